//! Room content generation: type, size class, and item payload per room.
//!
//! Pure data lookup against the weighted tables; no geometry is decided
//! here. The placement engine consumes the resulting requests in order.

use crate::item::{self, Item, ItemCondition, ItemQuantity, ItemRarity};
use crate::knobs::ItemKnobs;
use crate::rng::GenRng;
use crate::room::{RoomRequest, RoomSize, RoomType};

/// Generate `count` room content descriptors
pub fn generate_room_requests(
    count: usize,
    knobs: &ItemKnobs,
    rng: &mut GenRng,
) -> Vec<RoomRequest> {
    (0..count)
        .map(|_| {
            let kind = rng.weighted(RoomType::PROBABILITY);
            let size = rng.weighted(RoomSize::PROBABILITY);
            RoomRequest {
                kind,
                size,
                items: generate_items(knobs, rng),
                traps: Vec::new(),
            }
        })
        .collect()
}

/// Roll the item list for one room
fn generate_items(knobs: &ItemKnobs, rng: &mut GenRng) -> Vec<Item> {
    let quantity = knobs
        .quantity
        .unwrap_or_else(|| rng.weighted(ItemQuantity::PROBABILITY));
    let (min, max) = quantity.count_range();
    let count = rng.range(min, max);

    (0..count)
        .map(|_| {
            let rarity = knobs
                .rarity
                .unwrap_or_else(|| rng.weighted(ItemRarity::PROBABILITY));
            let condition = knobs
                .condition
                .unwrap_or_else(|| rng.weighted(ItemCondition::PROBABILITY));
            item::roll_item(rarity, condition, rng)
        })
        .collect()
}
