use core::fmt::Debug;
use core::fmt::Display;

/// A fixed-width integer that can be stored in an
/// [`IntHashSet`](crate::IntHashSet).
///
/// `ZERO` doubles as the empty-slot marker inside the table, so the set
/// tracks its membership with a separate flag. `hash_code` yields the
/// 32-bit hash used to pick a value's home slot; equal values must produce
/// equal hash codes.
///
/// Implementations are provided for all primitive integer types. Narrow
/// widths widen to 32 bits (sign- or zero-extending as the type dictates) and
/// 64-bit widths fold their halves together with `v ^ (v >> 32)`.
///
/// # Examples
///
/// ```rust
/// use probe_set::Primitive;
///
/// assert_eq!(5u8.hash_code(), 5);
/// assert_eq!((-1i8).hash_code(), -1);
/// assert_eq!((1u64 << 32).hash_code(), 1);
/// assert_eq!(<i16 as Primitive>::ZERO, 0);
/// ```
pub trait Primitive: Copy + Eq + Debug + Display + 'static {
    /// The value that marks an unoccupied slot.
    const ZERO: Self;

    /// Returns the 32-bit hash code of the value.
    fn hash_code(self) -> i32;
}

macro_rules! impl_primitive {
    ($($t:ty => |$v:ident| $hash:expr),* $(,)?) => {
        $(
            impl Primitive for $t {
                const ZERO: Self = 0;

                #[inline(always)]
                fn hash_code(self) -> i32 {
                    let $v = self;
                    $hash
                }
            }
        )*
    };
}

impl_primitive! {
    i8 => |v| v as i32,
    u8 => |v| v as i32,
    i16 => |v| v as i32,
    u16 => |v| v as i32,
    i32 => |v| v,
    u32 => |v| v as i32,
    i64 => |v| ((v as u64) ^ ((v as u64) >> 32)) as i32,
    u64 => |v| (v ^ (v >> 32)) as i32,
}

cfg_if::cfg_if! {
    if #[cfg(target_pointer_width = "64")] {
        impl_primitive! {
            isize => |v| (v as i64).hash_code(),
            usize => |v| (v as u64).hash_code(),
        }
    } else {
        impl_primitive! {
            isize => |v| v as i32,
            usize => |v| v as i32,
        }
    }
}
