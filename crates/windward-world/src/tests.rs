//! Unit tests for the world model and the local action server.

use windward_core::{ColonyId, PlayerId, TileId, UnitId};

use crate::{
    ActionServer, Colony, Direction, EquipmentKind, GoodsKind, Location, LocalServer, Market,
    Role, Unit, UnitKind, World, WorldMap,
};

// ── Helpers ───────────────────────────────────────────────────────────────────

/// 4x4 map: west half land, east half water.
fn coastal_world() -> World {
    let mut map = WorldMap::water(4, 4);
    for y in 0..4 {
        for x in 0..2 {
            if let Some(tile) = map.tile_mut(TileId(y * 4 + x)) {
                tile.land = true;
            }
        }
    }
    World::new(map)
}

fn spawn(world: &mut World, id: u32, kind: UnitKind, loc: Location) -> UnitId {
    world.add_unit(Unit::new(UnitId(id), PlayerId(0), kind, loc))
}

// ── Map ───────────────────────────────────────────────────────────────────────

mod map {
    use super::*;

    #[test]
    fn neighbor_arithmetic() {
        let map = WorldMap::land(4, 4);
        assert_eq!(map.neighbor(map.at(1, 1), Direction::E), Some(map.at(2, 1)));
        assert_eq!(map.neighbor(map.at(1, 1), Direction::NW), Some(map.at(0, 0)));
        assert_eq!(map.neighbor(map.at(0, 0), Direction::W), None);
        assert_eq!(map.neighbor(map.at(3, 3), Direction::SE), None);
    }

    #[test]
    fn greedy_heading_points_at_target() {
        let map = WorldMap::land(4, 4);
        assert_eq!(map.direction_toward(map.at(0, 0), map.at(3, 3)), Some(Direction::SE));
        assert_eq!(map.direction_toward(map.at(2, 1), map.at(0, 1)), Some(Direction::W));
        assert_eq!(map.direction_toward(map.at(1, 1), map.at(1, 1)), None);
    }

    #[test]
    fn entry_tile_is_the_first_eastern_water() {
        let mut map = WorldMap::water(4, 4);
        if let Some(tile) = map.tile_mut(map.at(3, 0)) {
            tile.land = true;
        }
        assert_eq!(map.entry_tile(), Some(map.at(3, 1)));
        assert_eq!(WorldMap::land(4, 4).entry_tile(), None);
    }

    #[test]
    fn adjacency_and_direction() {
        let map = WorldMap::land(4, 4);
        assert!(map.adjacent(map.at(1, 1), map.at(2, 2)));
        assert!(!map.adjacent(map.at(0, 0), map.at(2, 0)));
        assert!(!map.adjacent(map.at(1, 1), map.at(1, 1)));
        assert_eq!(map.direction_to(map.at(1, 1), map.at(1, 0)), Some(Direction::N));
    }
}

// ── Roles and equipment ───────────────────────────────────────────────────────

mod roles {
    use super::*;

    #[test]
    fn role_derivation() {
        assert_eq!(Role::of(&[]), Role::Plain);
        assert_eq!(Role::of(&[EquipmentKind::Horses]), Role::Scout);
        assert_eq!(Role::of(&[EquipmentKind::Muskets]), Role::Soldier);
        assert_eq!(
            Role::of(&[EquipmentKind::Muskets, EquipmentKind::Horses]),
            Role::Dragoon
        );
        assert_eq!(Role::of(&[EquipmentKind::Tools]), Role::Pioneer);
    }

    #[test]
    fn dragoon_acquisition_order_is_muskets_first() {
        assert_eq!(
            Role::Dragoon.equipment(),
            &[EquipmentKind::Muskets, EquipmentKind::Horses]
        );
    }

    #[test]
    fn natives_cannot_take_tools() {
        let brave = Unit::new(UnitId(1), PlayerId(0), UnitKind::Brave, Location::Europe);
        assert!(!brave.can_equip_with(EquipmentKind::Tools));
        assert!(brave.can_equip_with(EquipmentKind::Muskets));
    }

    #[test]
    fn carriers_take_no_equipment() {
        let ship = Unit::new(UnitId(1), PlayerId(0), UnitKind::Caravel, Location::Europe);
        assert!(!ship.can_equip_with(EquipmentKind::Muskets));
    }
}

// ── Market ────────────────────────────────────────────────────────────────────

mod market {
    use super::*;

    #[test]
    fn bid_price_scales() {
        let mut m = Market::new(PlayerId(0), 100);
        m.set_price(GoodsKind::Muskets, 3);
        assert_eq!(m.bid_price(GoodsKind::Muskets, 50), 150);
    }

    #[test]
    fn spend_is_all_or_nothing() {
        let mut m = Market::new(PlayerId(0), 10);
        assert!(!m.spend(11));
        assert_eq!(m.gold, 10);
        assert!(m.spend(10));
        assert_eq!(m.gold, 0);
    }

    #[test]
    fn mint_adds_gold() {
        let mut m = Market::new(PlayerId(0), 0);
        m.mint(500, "test");
        assert!(m.has_gold(500));
    }
}

// ── World queries ─────────────────────────────────────────────────────────────

mod world_queries {
    use super::*;

    #[test]
    fn disposed_units_are_invisible_but_probeable() {
        let mut world = coastal_world();
        let id = spawn(&mut world, 1, UnitKind::FreeColonist, Location::Tile(TileId(0)));
        world.dispose_unit(id);
        assert!(world.unit(id).is_none());
        assert!(world.unit_is_disposed(id));
        assert!(!world.unit_is_disposed(UnitId(99)));
    }

    #[test]
    fn unit_tile_resolves_through_carrier() {
        let mut world = coastal_world();
        let ship = spawn(&mut world, 1, UnitKind::Caravel, Location::Tile(TileId(2)));
        let passenger = spawn(&mut world, 2, UnitKind::FreeColonist, Location::OnCarrier(ship));
        assert_eq!(world.unit_tile(passenger), Some(TileId(2)));
    }

    #[test]
    fn space_accounting() {
        let mut world = coastal_world();
        let ship = spawn(&mut world, 1, UnitKind::Caravel, Location::Tile(TileId(2)));
        assert_eq!(world.space_available(ship), 2);
        spawn(&mut world, 2, UnitKind::FreeColonist, Location::OnCarrier(ship));
        assert_eq!(world.space_available(ship), 1);
        assert_eq!(world.units_aboard(ship), vec![UnitId(2)]);
    }

    #[test]
    fn rearrange_requests_accumulate_and_drain() {
        let mut world = coastal_world();
        world.add_colony(Colony::new(ColonyId(0), PlayerId(0), TileId(0)));
        world.notify_rearrange(ColonyId(0));
        world.notify_rearrange(ColonyId(0));
        assert_eq!(world.drain_rearrange_requests(), vec![ColonyId(0), ColonyId(0)]);
        assert!(world.drain_rearrange_requests().is_empty());
    }
}

// ── LocalServer ───────────────────────────────────────────────────────────────

mod server {
    use super::*;

    #[test]
    fn land_unit_cannot_walk_on_water() {
        let mut world = coastal_world();
        let id = spawn(&mut world, 1, UnitKind::FreeColonist, Location::Tile(TileId(1)));
        let mut server = LocalServer::new();
        assert!(!server.move_unit(&mut world, id, Direction::E)); // tile 2 is water
        assert!(server.move_unit(&mut world, id, Direction::W));
        assert_eq!(world.unit(id).map(|u| u.location), Some(Location::Tile(TileId(0))));
    }

    #[test]
    fn naval_unit_docks_only_at_colonies() {
        let mut world = coastal_world();
        world.add_colony(Colony::new(ColonyId(0), PlayerId(0), TileId(1)));
        let ship = spawn(&mut world, 1, UnitKind::Caravel, Location::Tile(TileId(2)));
        let mut server = LocalServer::new();
        assert!(server.move_unit(&mut world, ship, Direction::W)); // tile 1: colony dock
        assert!(!server.move_unit(&mut world, ship, Direction::W)); // tile 0: bare land
    }

    #[test]
    fn move_to_rejects_non_adjacent_tiles() {
        let mut world = coastal_world();
        let id = spawn(&mut world, 1, UnitKind::FreeColonist, Location::Tile(TileId(0)));
        let mut server = LocalServer::new();
        assert!(!server.move_to(&mut world, id, Location::Tile(TileId(8)))); // two rows away
        assert!(server.move_to(&mut world, id, Location::Tile(TileId(4)))); // one step south
        assert!(server.move_to(&mut world, id, Location::Tile(TileId(4)))); // already there
    }

    #[test]
    fn europe_crossings_are_naval_only() {
        let mut world = coastal_world();
        let ship = spawn(&mut world, 1, UnitKind::Caravel, Location::Tile(TileId(3)));
        let walker = spawn(&mut world, 2, UnitKind::FreeColonist, Location::Tile(TileId(0)));
        let mut server = LocalServer::new();
        assert!(server.move_to(&mut world, ship, Location::Europe));
        assert!(server.move_to(&mut world, ship, Location::Tile(TileId(3))));
        assert!(!server.move_to(&mut world, walker, Location::Europe));
    }

    #[test]
    fn embark_checks_space_and_position() {
        let mut world = coastal_world();
        let ship = spawn(&mut world, 1, UnitKind::Caravel, Location::Tile(TileId(2)));
        let near = spawn(&mut world, 2, UnitKind::FreeColonist, Location::Tile(TileId(1)));
        let far = spawn(&mut world, 3, UnitKind::FreeColonist, Location::Tile(TileId(0)));
        let mut server = LocalServer::new();
        assert!(server.embark(&mut world, ship, near, Some(Direction::E)));
        assert_eq!(world.unit(near).map(|u| u.location), Some(Location::OnCarrier(ship)));
        // Not adjacent, and no direction that reaches the ship.
        assert!(!server.embark(&mut world, ship, far, Some(Direction::E)));
    }

    #[test]
    fn embark_in_europe() {
        let mut world = coastal_world();
        let ship = spawn(&mut world, 1, UnitKind::Galleon, Location::Europe);
        let unit = spawn(&mut world, 2, UnitKind::FreeColonist, Location::Europe);
        let mut server = LocalServer::new();
        assert!(server.embark(&mut world, ship, unit, None));
    }

    #[test]
    fn disembark_requires_docked_carrier() {
        let mut world = coastal_world();
        world.add_colony(Colony::new(ColonyId(0), PlayerId(0), TileId(1)));
        let ship = spawn(&mut world, 1, UnitKind::Caravel, Location::Tile(TileId(2)));
        let unit = spawn(&mut world, 2, UnitKind::FreeColonist, Location::OnCarrier(ship));
        let mut server = LocalServer::new();
        assert!(!server.disembark(&mut world, unit)); // carrier at sea
        assert!(server.move_unit(&mut world, ship, Direction::W)); // dock
        assert!(server.disembark(&mut world, unit));
        assert_eq!(world.unit(unit).map(|u| u.location), Some(Location::Tile(TileId(1))));
    }

    #[test]
    fn disembark_in_europe() {
        let mut world = coastal_world();
        let ship = spawn(&mut world, 1, UnitKind::Galleon, Location::Europe);
        let unit = spawn(&mut world, 2, UnitKind::FreeColonist, Location::OnCarrier(ship));
        let mut server = LocalServer::new();
        assert!(server.disembark(&mut world, unit));
        assert_eq!(world.unit(unit).map(|u| u.location), Some(Location::Europe));
    }

    #[test]
    fn europe_purchase_respects_gold() {
        let mut world = coastal_world();
        let unit = spawn(&mut world, 1, UnitKind::FreeColonist, Location::Europe);
        let mut market = Market::new(PlayerId(0), 100);
        market.set_price(GoodsKind::Horses, 2); // 50 horses → 100 gold
        world.add_market(market);
        let mut server = LocalServer::new();
        assert!(server.equip(&mut world, unit, EquipmentKind::Horses));
        assert!(!server.equip(&mut world, unit, EquipmentKind::Muskets)); // broke now
        assert_eq!(world.unit(unit).map(|u| u.role()), Some(Role::Scout));
    }

    #[test]
    fn colony_build_respects_buildable_set() {
        let mut world = coastal_world();
        let mut colony = Colony::new(ColonyId(0), PlayerId(0), TileId(0));
        colony.buildable.push(EquipmentKind::Tools);
        world.add_colony(colony);
        let unit = spawn(&mut world, 1, UnitKind::FreeColonist, Location::Tile(TileId(0)));
        let mut server = LocalServer::new();
        assert!(server.equip(&mut world, unit, EquipmentKind::Tools));
        assert!(!server.equip(&mut world, unit, EquipmentKind::Muskets));
        assert_eq!(world.unit(unit).map(|u| u.role()), Some(Role::Pioneer));
    }
}
