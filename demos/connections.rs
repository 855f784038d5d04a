//! Connection pool with a create/destroy factory
//!
//! The pool stays at a fixed size (reject-on-exhaustion) and is torn down
//! through the factory at the end.

use slotpool::{ExhaustionPolicy, ItemFactory, Pool, PoolConfig};
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug)]
struct Connection {
    id: usize,
    addr: String,
}

struct ConnectionFactory {
    addr: String,
    next_id: AtomicUsize,
}

impl ItemFactory<Connection> for ConnectionFactory {
    fn create(&self) -> Connection {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        println!("   [factory] opening connection {id} to {}", self.addr);
        Connection {
            id,
            addr: self.addr.clone(),
        }
    }

    fn destroy(&self, conn: Connection) {
        println!("   [factory] closing connection {}", conn.id);
    }
}

fn main() {
    println!("=== slotpool - Connection Demo ===\n");

    let factory = ConnectionFactory {
        addr: String::from("db.local:5432"),
        next_id: AtomicUsize::new(0),
    };

    let config = PoolConfig::new().with_exhaustion_policy(ExhaustionPolicy::Reject);
    let pool = Pool::with_factory(factory, 2, config);

    println!("\n1. Checking out both connections:");
    let a = pool.acquire().unwrap();
    let b = pool.acquire().unwrap();
    println!("   got {:?} and {:?}", a.addr, b.id);

    println!("\n2. Pool is exhausted, acquire is rejected:");
    match pool.acquire() {
        Ok(_) => println!("   unexpected success"),
        Err(e) => println!("   error: {e}"),
    }

    println!("\n3. Returning one and retrying:");
    drop(a);
    let again = pool.acquire().unwrap();
    println!("   reused connection {}", again.id);

    println!("\n4. Draining the pool:");
    drop(again);
    drop(b);
    let destroyed = pool.destroy_all();
    println!("   {destroyed} connections handed to the factory");
    println!("   acquire after drain: {:?}", pool.acquire().err());
}
