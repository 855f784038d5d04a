//! Particle pool for a game effect system
//!
//! A burst needs more particles than the pool holds, so the pool grows;
//! dissipated particles return and get reused by the next burst.

use slotpool::{Pool, PoolConfig, PoolEvent, PooledItem};

#[derive(Debug)]
struct Particle {
    x: f32,
    y: f32,
    ttl_frames: u32,
}

impl Particle {
    fn new() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            ttl_frames: 0,
        }
    }

    fn ignite(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.ttl_frames = 60;
    }
}

fn main() {
    println!("=== slotpool - Particle Demo ===\n");

    let config = PoolConfig::new().with_event_hook(|event| {
        if let PoolEvent::Grew { total_items, .. } = event {
            println!("   [pool] no free particle, grew to {total_items}");
        }
    });

    let pool = Pool::from_fn(Particle::new, 3, config);
    println!("Pool warmed with {} particles\n", pool.free_count());

    println!("Explosion! Spawning particles...");
    let mut burst = spawn_burst(&pool, 3, (10.0, 20.0));
    report(&pool);

    println!("\nParticles dissipate...");
    burst.truncate(1);
    report(&pool);

    println!("\nNew explosion! Reusing particles...");
    let second = spawn_burst(&pool, 3, (42.0, 7.0));
    for particle in &second {
        println!(
            "   particle {} at ({}, {}), {} frames left",
            particle.item_id(),
            particle.x,
            particle.y,
            particle.ttl_frames
        );
    }
    report(&pool);
}

fn spawn_burst(pool: &Pool<Particle>, count: usize, origin: (f32, f32)) -> Vec<PooledItem<Particle>> {
    (0..count)
        .map(|i| {
            let mut particle = pool.acquire().unwrap();
            particle.ignite(origin.0 + i as f32, origin.1);
            particle
        })
        .collect()
}

fn report(pool: &Pool<Particle>) {
    println!(
        "   free: {}, in use: {}, total: {}",
        pool.free_count(),
        pool.in_use_count(),
        pool.total_count()
    );
}
