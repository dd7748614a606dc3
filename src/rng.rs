// Lazily-seeded PRNG backing `BigInt::random`.
//
// The source models this as a one-shot seed flag that is process-wide,
// mutable state, and deliberately not synchronized: callers needing
// multithreaded random generation must serialize themselves or supply their
// own generator. We keep that contract here rather than papering over it
// with a Mutex, which would silently turn concurrent `random()` calls into
// a serialization point the source never had. Use [`BigInt::random_with`]
// to sidestep the global generator entirely.

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Anything that can hand out uniform 32-bit payload chunks. Blanket-
/// implemented for any `rand::RngCore`, so callers can pass `&mut thread_rng()`
/// or any other generator to `BigInt::random_with`.
pub trait RngLike {
    fn next_chunk(&mut self) -> u32;
}

impl<T: RngCore> RngLike for T {
    fn next_chunk(&mut self) -> u32 {
        self.gen::<u32>()
    }
}

static mut SEEDED: bool = false;
static mut GLOBAL: Option<StdRng> = None;

/// Runs `f` against the lazily-seeded global generator, seeding it from OS
/// entropy on first use. Not thread-safe by design; see module docs.
pub(crate) fn with_global<R>(f: impl FnOnce(&mut StdRng) -> R) -> R {
    // SAFETY: this crate documents `BigInt::random` as not thread-safe;
    // callers needing concurrent random generation must serialize
    // themselves or use `BigInt::random_with`.
    unsafe {
        if !SEEDED {
            GLOBAL = Some(StdRng::from_entropy());
            SEEDED = true;
        }
        #[allow(static_mut_refs)]
        f(GLOBAL.as_mut().unwrap())
    }
}
