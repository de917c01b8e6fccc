//! Property tests for coordinate mapping, fusion and export encoding.

use marga_map::export::{
    Arrow, Curb, ExportFields, FenceRamp, Lamp, LaneLine, Obstacle, Region, RoadEdge, StopLine,
};
use marga_map::{
    Cell, CoordinateRange, Evidence, GridCoord, MargaConfig, Point3B, RangeBounds, TypePriority,
};
use proptest::prelude::*;

fn arb_fields() -> impl Strategy<Value = ExportFields> {
    (
        (
            0..RoadEdge::ALL.len(),
            0..Obstacle::ALL.len(),
            0..LaneLine::ALL.len(),
            0..StopLine::ALL.len(),
            0..Curb::ALL.len(),
        ),
        (
            0..FenceRamp::ALL.len(),
            0..Region::ALL.len(),
            0..Arrow::ALL.len(),
            0..Lamp::ALL.len(),
        ),
    )
        .prop_map(
            |((road_edge, obstacle, lane_line, stop_line, curb), (fence_ramp, region, arrow, lamp))| {
                ExportFields {
                    road_edge: RoadEdge::ALL[road_edge],
                    obstacle: Obstacle::ALL[obstacle],
                    lane_line: LaneLine::ALL[lane_line],
                    stop_line: StopLine::ALL[stop_line],
                    curb: Curb::ALL[curb],
                    fence_ramp: FenceRamp::ALL[fence_ramp],
                    region: Region::ALL[region],
                    arrow: Arrow::ALL[arrow],
                    lamp: Lamp::ALL[lamp],
                }
            },
        )
}

fn arb_evidence() -> impl Strategy<Value = Evidence> {
    prop_oneof![
        Just(Evidence::Occupied),
        Just(Evidence::Clear),
        Just(Evidence::Neutral),
    ]
}

proptest! {
    #[test]
    fn cell_centre_maps_back_to_cell(x in 0u16..125, y in 0u16..125) {
        let params = MargaConfig::default();
        let range = CoordinateRange::from_params(&params).unwrap();
        let coord = GridCoord::new(x, y);
        let centre = range.to_global(coord);
        prop_assert_eq!(range.to_local(centre.x, centre.y).unwrap(), coord);
    }

    #[test]
    fn point_within_half_cell_of_its_centre(x in -5.0f64..5.0, y in 0.0f64..10.0) {
        let params = MargaConfig::default();
        let range = CoordinateRange::from_params(&params).unwrap();
        let coord = range.to_local(x, y).unwrap();
        prop_assert!(range.contains_coord(coord));
        let centre = range.to_global(coord);
        let half = range.resolution() / 2.0 + 1e-9;
        prop_assert!((centre.x - x).abs() <= half);
        prop_assert!((centre.y - y).abs() <= half);
    }

    #[test]
    fn outside_points_rejected(x in 5.0f64..100.0, y in 0.0f64..10.0) {
        let params = MargaConfig::default();
        let range = CoordinateRange::from_params(&params).unwrap();
        prop_assert!(range.to_local(x, y).is_err());
        prop_assert!(range.to_local(-x, y).is_err() || -x >= -5.0);
    }

    #[test]
    fn translate_by_whole_cells(
        x in 0u16..125,
        y in 0u16..125,
        dx in -40i32..40,
        dy in -40i32..40,
    ) {
        let params = MargaConfig::default();
        let a = CoordinateRange::from_params(&params).unwrap();
        let mut b = a.clone();
        let g = params.scale.grid_size;
        b.shift(dx as f64 * g, dy as f64 * g).unwrap();

        let nx = x as i32 - dx;
        let ny = y as i32 - dy;
        let moved = a.translate(GridCoord::new(x, y), &b);
        if (0..125).contains(&nx) && (0..125).contains(&ny) {
            prop_assert_eq!(moved.unwrap(), GridCoord::new(nx as u16, ny as u16));
        } else {
            prop_assert!(moved.is_err());
        }
    }

    #[test]
    fn translate_between_unaligned_ranges(
        left in -20.0f64..20.0,
        bottom in -20.0f64..20.0,
        extent_x in 0.3f64..15.0,
        extent_y in 0.3f64..15.0,
        fx in 0.0f64..1.0,
        fy in 0.0f64..1.0,
        dx in -3.0f64..3.0,
        dy in -3.0f64..3.0,
    ) {
        let params = MargaConfig::default();
        let bounds = RangeBounds::new(left, left + extent_x, bottom, bottom + extent_y);
        let a = CoordinateRange::new(&params, bounds).unwrap();
        let coord = GridCoord::new(
            (fx * a.width() as f64) as u16,
            (fy * a.height() as f64) as u16,
        );

        // Every cell, edge cells included, maps onto itself
        let centre = a.to_global(coord);
        prop_assert!(a.contains(centre.x, centre.y));
        prop_assert_eq!(a.translate(coord, &a).unwrap(), coord);

        let mut b = a.clone();
        b.shift(dx, dy).unwrap();
        let moved = a.translate(coord, &b);
        if b.contains(centre.x, centre.y) {
            let landed = b.to_global(moved.unwrap());
            let half = b.resolution() / 2.0 + 1e-9;
            prop_assert!((landed.x - centre.x).abs() <= half);
            prop_assert!((landed.y - centre.y).abs() <= half);
        } else {
            prop_assert!(moved.is_err());
        }
    }

    #[test]
    fn encode_decode_identity(fields in arb_fields()) {
        let record = Point3B::encode(&fields);
        prop_assert_eq!(record.decode().unwrap(), fields);
        prop_assert_eq!(Point3B::pack(&fields.codes()).unwrap(), record);
        prop_assert_eq!(record.sig & 0b0011_1111, 0);
    }

    #[test]
    fn probability_stays_in_unit_interval(
        steps in prop::collection::vec(arb_evidence(), 0..200),
    ) {
        let mut cell = Cell::new();
        for evidence in steps {
            cell.apply_evidence(evidence, 0.05);
            prop_assert!((0.0..=1.0).contains(&cell.probability()));
        }
    }

    #[test]
    fn fusion_commutes_without_saturation(
        a in prop::collection::vec(arb_evidence(), 0..6),
        b in prop::collection::vec(arb_evidence(), 0..6),
        za in -2000i16..0,
        zb in -2000i16..0,
    ) {
        let priority = TypePriority::default();
        let build = |steps: &[Evidence], z: i16| {
            let mut cell = Cell::from_point(z);
            for &e in steps {
                cell.apply_evidence(e, 0.05);
            }
            cell
        };
        let (ca, cb) = (build(&a, za), build(&b, zb));

        let mut ab = ca;
        ab.fuse(&cb, &priority);
        let mut ba = cb;
        ba.fuse(&ca, &priority);

        prop_assert!((ab.probability() - ba.probability()).abs() < 1e-5);
        prop_assert_eq!(ab.highest(), ba.highest());
        prop_assert_eq!(ab.lowest(), ba.lowest());
        prop_assert_eq!(ab.point_num(), 2);
        prop_assert_eq!(ab.hit_count(), ba.hit_count());
        prop_assert!((ab.average() - ba.average()).abs() < 1e-2);
    }
}
