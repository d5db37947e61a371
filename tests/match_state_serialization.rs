#![cfg(feature = "std")]

use proptest::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use woodland_battleship::{IdentityKey, Layout, Match, Message, PieceSet, SharedMatch};

proptest! {
    #[test]
    fn match_roundtrip(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let shared = SharedMatch::default();
        let (fox, badger) = (IdentityKey::from("10.0.0.1"), IdentityKey::from("10.0.0.2"));
        shared.register(fox.clone()).unwrap();
        shared.register(badger.clone()).unwrap();
        for (id, animal) in [(&fox, "fox"), (&badger, "badger")] {
            let layout = Layout::random(&mut rng, &PieceSet::standard()).unwrap();
            shared.submit_layout(id, animal, Some(&layout)).unwrap();
        }
        for _ in 0..rng.random_range(0..20) {
            let target = (rng.random_range(0..8), rng.random_range(0..8));
            let _ = shared.submit_shot(&fox, target);
        }

        let game = shared.snapshot();
        let bytes = bincode::serialize(&game).unwrap();
        let decoded: Match = bincode::deserialize(&bytes).unwrap();
        prop_assert_eq!(&decoded, &game);
        prop_assert_eq!(decoded.status(&badger).unwrap(), game.status(&badger).unwrap());
    }
}

#[test]
fn layout_message_roundtrip() {
    let msg = Message::Layout {
        animal: "fox".to_string(),
        positions: Some(Layout::columns(&PieceSet::standard())),
    };
    let bytes = bincode::serialize(&msg).unwrap();
    let decoded: Message = bincode::deserialize(&bytes).unwrap();
    assert_eq!(decoded, msg);
}
