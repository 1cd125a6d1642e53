//! Stable MSD radix sort kernels over unsigned keys.
//!
//! Everything here works on *positions*: `u32` indices into a key array. The
//! kernels reorder positions and never move or copy the keys themselves.

pub mod fallback;
pub mod key;
pub mod partition;
pub mod pass;
pub mod range;
pub mod refine;
pub mod sort_kernel;

pub use key::RadixKey;
pub use partition::{stable_partition, Partition};
pub use pass::{counting_pass, Scratch};
pub use range::{KeyRange, PassPlan, Window, MAX_PASS_BITS};
pub use refine::{refine, Task};
pub use sort_kernel::{RadixParams, SortKernel, SortStats};
