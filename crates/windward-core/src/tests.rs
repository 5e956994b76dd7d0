//! Unit tests for windward-core primitives.

#[cfg(test)]
mod ids {
    use crate::{ColonyId, PlayerId, UnitId};

    #[test]
    fn index_and_validity() {
        let id = UnitId(42);
        assert_eq!(id.index(), 42);
        assert!(id.is_valid());
        assert!(!UnitId::INVALID.is_valid());
    }

    #[test]
    fn ordering() {
        assert!(UnitId(0) < UnitId(1));
        assert!(PlayerId(3) > PlayerId(2));
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(UnitId::INVALID.0, u32::MAX);
        assert_eq!(ColonyId::INVALID.0, u16::MAX);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(UnitId::default(), UnitId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(UnitId(7).to_string(), "UnitId(7)");
    }
}

#[cfg(test)]
mod turn {
    use crate::Turn;

    #[test]
    fn arithmetic() {
        let t = Turn(10);
        assert_eq!(t + 5, Turn(15));
        assert_eq!(t.next(), Turn(11));
        assert_eq!(Turn(15).since(Turn(10)), 5);
    }

    #[test]
    fn display() {
        assert_eq!(Turn(3).to_string(), "turn 3");
    }
}

#[cfg(test)]
mod rng {
    use crate::{OwnerRng, PlayerId, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = OwnerRng::new(12345, PlayerId(0));
        let mut r2 = OwnerRng::new(12345, PlayerId(0));
        for _ in 0..100 {
            let a: u32 = r1.gen_range(0..1000);
            let b: u32 = r2.gen_range(0..1000);
            assert_eq!(a, b);
        }
    }

    #[test]
    fn adjacent_owners_diverge() {
        let mut r0 = OwnerRng::new(1, PlayerId(0));
        let mut r1 = OwnerRng::new(1, PlayerId(1));
        let a: u64 = r0.gen_range(0..u64::MAX);
        let b: u64 = r1.gen_range(0..u64::MAX);
        assert_ne!(a, b, "seeds for adjacent players should diverge");
    }

    #[test]
    fn gen_bool_extremes() {
        let mut rng = OwnerRng::new(0, PlayerId(0));
        assert!(!rng.gen_bool(0.0));
        assert!(rng.gen_bool(1.0));
    }

    #[test]
    fn choose_empty_is_none() {
        let mut rng = OwnerRng::new(0, PlayerId(0));
        let empty: &[u8] = &[];
        assert!(rng.choose(empty).is_none());
    }

    #[test]
    fn sim_rng_children_differ() {
        let mut root = SimRng::new(7);
        let mut a = root.child(0);
        let mut b = root.child(1);
        assert_ne!(a.gen_range(0..u64::MAX), b.gen_range(0..u64::MAX));
    }
}
