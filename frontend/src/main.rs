use leptos::prelude::*;
use studyapp_frontend::{App, panic_hook};

// lol_alloc keeps the WASM binary small
#[cfg(target_arch = "wasm32")]
use lol_alloc::{AssumeSingleThreaded, FreeListAllocator};

#[cfg(target_arch = "wasm32")]
#[global_allocator]
static ALLOCATOR: AssumeSingleThreaded<FreeListAllocator> =
    unsafe { AssumeSingleThreaded::new(FreeListAllocator::new()) };

pub fn main() {
    panic_hook::install();
    mount_to_body(App);
}
