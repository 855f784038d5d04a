// slotpool - thread-safe object pool with first-fit reuse

// This is just a binary wrapper - the actual library is in lib.rs
// Run demos with: cargo run --example particles

use slotpool::{Pool, PoolConfig};

fn main() {
    println!("=== slotpool ===");
    println!("See demos/ directory for usage examples");
    println!("Run: cargo run --example particles");
    println!();

    // Quick demo
    println!("Quick Demo:");
    let pool = Pool::new(vec![1, 2, 3], PoolConfig::default());

    {
        let item = pool.acquire().unwrap();
        println!("  Got item: {}", *item);
    }

    println!("  Free after return: {}", pool.free_count());
}
