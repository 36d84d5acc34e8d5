//! End-to-end sizing scenarios with literal expected values.

use pgbv_core::geometry::{Coordinate, Size};
use pgbv_core::model::{Relation, Table, Toast};
use pgbv_layout::{LayoutConfig, LayoutEngine, PlacementKind};

fn relation(name: &str, n: usize) -> Relation {
    Relation::new(name, vec![4096; n])
}

#[test]
fn primary_with_one_index_and_no_toast() {
    let engine = LayoutEngine::new(LayoutConfig::new(Size::new(1, 1), Size::ZERO));
    let table = Table::new(relation("pgbench_accounts", 257))
        .with_index(relation("pgbench_accounts_pkey", 9));

    assert_eq!(engine.relation_grid_size(&table.relation), Size::new(17, 16));
    // 3x3 grid widened by the narrow floor
    assert_eq!(engine.ancillary_footprint(&table), Size::new(10, 3));
    assert_eq!(engine.total_canvas_size(&table), Size::new(17, 16 + 3));

    let composition = engine.compose(&table);
    assert_eq!(
        composition.order(),
        vec![PlacementKind::Index(0), PlacementKind::Primary]
    );
    assert_eq!(composition.placements[0].origin, Coordinate::new(1, 1));
    assert_eq!(composition.placements[1].origin, Coordinate::new(1, 4));
    assert_eq!(composition.block_count(), 266);
}

#[test]
fn one_index_plus_toast_without_margin_or_floor() {
    let engine = LayoutEngine::new(LayoutConfig::default().without_floor());
    let table = Table::new(relation("docs", 100))
        .with_index(relation("docs_pkey", 9))
        .with_toast(Toast::new(
            relation("pg_toast_16390", 3),
            relation("pg_toast_16390_index", 3),
        ));

    let nine = engine.relation_grid_size(&relation("a", 9));
    let three = engine.relation_grid_size(&relation("b", 3));
    assert_eq!(
        engine.ancillary_footprint(&table),
        Size::new(
            nine.width + three.width + three.width,
            nine.height.max(three.height)
        )
    );
    assert_eq!(engine.ancillary_footprint(&table), Size::new(7, 3));
    // primary 10x10 under a 7x3 row
    assert_eq!(engine.total_canvas_size(&table), Size::new(10, 13));
}

#[test]
fn margins_separate_neighbours() {
    let engine = LayoutEngine::new(LayoutConfig::new(Size::new(10, 10), Size::new(3, 3)));
    let table = Table::new(relation("t", 400))
        .with_index(relation("t_a", 100))
        .with_index(relation("t_b", 100));

    let composition = engine.compose(&table);
    let origins: Vec<_> = composition.placements.iter().map(|p| p.origin).collect();
    // 100 blocks -> 10x10 grid, 13x13 with margin
    assert_eq!(
        origins,
        vec![
            Coordinate::new(1, 1),
            Coordinate::new(14, 1),
            Coordinate::new(1, 14),
        ]
    );
    // 26x13 row over a 23x23 primary, plus the origin cell, in 10px blocks
    assert_eq!(engine.total_canvas_size(&table), Size::new(26, 36));
    assert_eq!(engine.pixel_size(&table), Size::new(270, 370));
}

#[test]
fn many_indexes_widen_the_canvas() {
    let engine = LayoutEngine::default();
    let mut table = Table::new(relation("t", 36));
    for i in 0..8 {
        table = table.with_index(relation(&format!("t_idx_{i}"), 36));
    }
    // each 6x6, eight of them side by side
    assert_eq!(engine.ancillary_footprint(&table), Size::new(48, 6));
    assert_eq!(engine.total_canvas_size(&table), Size::new(48, 12));
}
