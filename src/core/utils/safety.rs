//! Zero-Cost Safety Macros
//!
//! Kernel inner loops read neighbour cells millions of times per tick.
//!
//! In Debug mode: Normal bounds-checked access (panics with useful errors)
//! In Release mode: Unsafe unchecked access (zero overhead)
//!
//! Only use these where the index is already proven in range (clamped
//! neighbour lookups, equal-length buffer copies).
//!
//! Usage:
//! ```rust
//! use dyeflow_engine::fast;
//!
//! let idx = 2;
//!
//! let pressure = vec![0.5f32, 1.0, 1.5, 2.0];
//! // Read: fast!(slice, [index])
//! let p = *fast!(pressure, [idx]);
//! assert_eq!(p, 1.5);
//!
//! let mut divergence = vec![0.0f32; 4];
//! // Write: fast!(slice, [index] = value)
//! fast!(divergence, [idx] = -0.25);
//! assert_eq!(divergence[idx], -0.25);
//! ```

/// Zero-cost bounds checking macro
///
/// - Debug: Uses normal indexing with bounds checks
/// - Release: Uses get_unchecked/get_unchecked_mut
#[macro_export]
macro_rules! fast {
    // Read pattern: fast!(slice, [index])
    ($slice:expr, [$index:expr]) => {{
        #[cfg(debug_assertions)]
        {
            &$slice[$index]
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { $slice.get_unchecked($index) }
        }
    }};

    // Write pattern: fast!(slice, [index] = value)
    ($slice:expr, [$index:expr] = $val:expr) => {{
        #[cfg(debug_assertions)]
        {
            $slice[$index] = $val;
        }
        #[cfg(not(debug_assertions))]
        {
            unsafe { *$slice.get_unchecked_mut($index) = $val; }
        }
    }};
}
