//! Customer generator — spawns shoppers while the store is open.
//!
//! One customer arrives every `spawn_interval` in-game minutes until
//! the live count reaches `max_customers`. Each arrival buys one unit
//! from a random stocked shelf, or nothing when every shelf is empty,
//! then stays on the floor until the day is cleared.

use crate::{
    rng::StreamRng,
    shop::{IdAllocator, Shelf},
    types::{EntityId, Minutes},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id:         EntityId,
    pub arrived_at: Minutes,
    /// Shelf bought from, if the customer bought anything.
    pub bought_from: Option<EntityId>,
}

/// An arrival and the money it brought in.
#[derive(Debug, Clone, PartialEq)]
pub struct Arrival {
    pub customer: Customer,
    pub spent:    f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerGenerator {
    pub max_customers:     u32,
    pub current_customers: u32,
    pub customers:         Vec<Customer>,
    spawn_interval:        Minutes,
    since_last_spawn:      Minutes,
}

impl CustomerGenerator {
    pub fn new(max_customers: u32, spawn_interval: Minutes) -> Self {
        Self {
            max_customers,
            current_customers: 0,
            customers: Vec::new(),
            spawn_interval,
            since_last_spawn: 0.0,
        }
    }

    /// Accumulate the `elapsed` open minutes ending at `window_end` and
    /// spawn whoever is due.
    pub fn update(
        &mut self,
        elapsed: Minutes,
        window_end: Minutes,
        shelves: &mut [Shelf],
        ids: &mut IdAllocator,
        purchases_rng: &mut StreamRng,
    ) -> Vec<Arrival> {
        let mut arrivals = Vec::new();
        self.since_last_spawn += elapsed;

        while self.since_last_spawn >= self.spawn_interval {
            self.since_last_spawn -= self.spawn_interval;
            if self.current_customers >= self.max_customers {
                // Cap reached: drop the backlog instead of bursting later.
                self.since_last_spawn = 0.0;
                break;
            }

            let mut customer = Customer {
                id: ids.next_id(),
                arrived_at: window_end - self.since_last_spawn,
                bought_from: None,
            };
            let mut spent = 0.0;

            let stocked: Vec<usize> = shelves
                .iter()
                .enumerate()
                .filter(|(_, s)| s.in_stock())
                .map(|(i, _)| i)
                .collect();
            if !stocked.is_empty() {
                let shelf = &mut shelves[stocked[purchases_rng.next_index(stocked.len())]];
                if let Some(price) = shelf.take_one() {
                    customer.bought_from = Some(shelf.id);
                    spent = price;
                }
            }

            log::debug!(
                "customer {} arrived, spent {spent:.2} ({}/{})",
                customer.id,
                self.current_customers + 1,
                self.max_customers
            );
            self.customers.push(customer.clone());
            self.current_customers += 1;
            arrivals.push(Arrival { customer, spent });
        }

        arrivals
    }

    /// Remove every customer, newest first. Returns how many were removed.
    pub fn clear(&mut self) -> u32 {
        let mut removed = 0;
        while let Some(customer) = self.customers.pop() {
            log::debug!("customer {} cleared", customer.id);
            self.current_customers = self.current_customers.saturating_sub(1);
            removed += 1;
        }
        self.since_last_spawn = 0.0;
        removed
    }

    /// Multiply the cap, rounding half to even.
    pub fn scale_cap(&mut self, factor: f64) -> u32 {
        let scaled = (f64::from(self.max_customers) * factor).round_ties_even();
        self.max_customers = scaled.clamp(0.0, f64::from(u32::MAX)) as u32;
        self.max_customers
    }
}
