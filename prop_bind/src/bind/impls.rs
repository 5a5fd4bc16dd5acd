//! `Bindable` implementations for standard library and `chrono` types.

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;
use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{Bindable, Binding, ScalarKind, Shape, Slot, short_type_name};
use crate::convert::{parse_bool, parse_integer, parse_unsigned};
use crate::error::{BindError, BindResult};

macro_rules! impl_integer {
    ($kind:ident, $parse:path => $($ty:ty),+ $(,)?) => {$(
        impl Bindable for $ty {
            fn shape() -> Shape {
                Shape::Scalar(ScalarKind::$kind)
            }

            fn bind_structural(&mut self, binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()> {
                binding.bind_scalar(self, slot)
            }

            fn cast_scalar(raw: &str) -> Option<Result<Self, String>> {
                Some($parse(raw).and_then(|wide| {
                    <$ty>::try_from(wide)
                        .map_err(|_| format!("{wide} is out of range for {}", stringify!($ty)))
                }))
            }
        }
    )+};
}

impl_integer!(Signed, parse_integer => i8, i16, i32, i64, i128, isize);
impl_integer!(Unsigned, parse_unsigned => u8, u16, u32, u64, u128, usize);

macro_rules! impl_float {
    ($($ty:ty),+ $(,)?) => {$(
        impl Bindable for $ty {
            fn shape() -> Shape {
                Shape::Scalar(ScalarKind::Float)
            }

            fn bind_structural(&mut self, binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()> {
                binding.bind_scalar(self, slot)
            }

            fn cast_scalar(raw: &str) -> Option<Result<Self, String>> {
                Some(raw.trim().parse::<$ty>().map_err(|err| err.to_string()))
            }
        }
    )+};
}

impl_float!(f32, f64);

impl Bindable for String {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Text)
    }

    fn bind_structural(&mut self, binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()> {
        binding.bind_scalar(self, slot)
    }

    fn cast_scalar(raw: &str) -> Option<Result<Self, String>> {
        Some(Ok(raw.to_owned()))
    }
}

impl Bindable for bool {
    fn shape() -> Shape {
        Shape::Scalar(ScalarKind::Bool)
    }

    fn bind_structural(&mut self, binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()> {
        binding.bind_scalar(self, slot)
    }

    fn cast_scalar(raw: &str) -> Option<Result<Self, String>> {
        Some(parse_bool(raw))
    }
}

impl<E: Bindable> Bindable for Vec<E> {
    fn shape() -> Shape {
        Shape::Sequence
    }

    fn bind_structural(&mut self, binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()> {
        *self = binding.bind_sequence::<E>(slot)?;
        Ok(())
    }
}

impl<E, S> Bindable for HashMap<String, E, S>
where
    E: Bindable,
    S: BuildHasher + Default + 'static,
{
    fn shape() -> Shape {
        Shape::Mapping
    }

    fn bind_structural(&mut self, binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()> {
        *self = binding.bind_mapping::<E>(slot)?.into_iter().collect();
        Ok(())
    }
}

impl<E: Bindable> Bindable for BTreeMap<String, E> {
    fn shape() -> Shape {
        Shape::Mapping
    }

    fn bind_structural(&mut self, binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()> {
        *self = binding.bind_mapping::<E>(slot)?.into_iter().collect();
        Ok(())
    }
}

macro_rules! impl_pointer {
    ($($ptr:ident),+ $(,)?) => {$(
        impl<T: Bindable> Bindable for $ptr<T> {
            fn shape() -> Shape {
                Shape::Pointer
            }

            fn bind_structural(&mut self, _binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()> {
                Err(BindError::invalid_target(
                    slot.scope(),
                    "binding target cannot be a pointer",
                ))
            }
        }
    )+};
}

impl_pointer!(Box, Option);

macro_rules! impl_opaque {
    ($($ty:ty),+ $(,)?) => {$(
        impl Bindable for $ty {
            fn shape() -> Shape {
                Shape::Opaque
            }

            fn bind_structural(&mut self, _binding: &Binding<'_>, slot: &Slot<'_>) -> BindResult<()> {
                Err(BindError::unsupported_type(slot.scope(), short_type_name::<Self>()))
            }
        }
    )+};
}

impl_opaque!(Duration, DateTime<Utc>);
