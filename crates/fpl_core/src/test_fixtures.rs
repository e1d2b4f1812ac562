//! Shared squads for unit tests.

use crate::models::{Player, PositionCategory};

pub(crate) fn player(id: u32, name: &str, category: PositionCategory) -> Player {
    Player::new(id, name, category)
}

/// 15 distinct players, 2 GK + 5 DEF + 5 MID + 3 FWD, in category order.
pub(crate) fn full_squad() -> Vec<Player> {
    use PositionCategory::*;
    vec![
        player(101, "Raya", Goalkeeper),
        player(102, "Arrizabalaga", Goalkeeper),
        player(201, "Saliba", Defender),
        player(202, "Gabriel", Defender),
        player(203, "White", Defender),
        player(204, "Timber", Defender),
        player(205, "Zinchenko", Defender),
        player(301, "Odegaard", Midfielder),
        player(302, "Rice", Midfielder),
        player(303, "Saka", Midfielder),
        player(304, "Martinelli", Midfielder),
        player(305, "Trossard", Midfielder),
        player(401, "Havertz", Forward),
        player(402, "Jesus", Forward),
        player(403, "Nketiah", Forward),
    ]
}
