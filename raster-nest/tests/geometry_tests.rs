#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use test_case::test_case;

    use raster_nest::entities::{Entity, Part};
    use raster_nest::geometry::geo_traits::{Bounded, CollidesWith, DistanceTo};
    use raster_nest::geometry::normalize_angle;
    use raster_nest::geometry::primitives::{Edge, Point, Rect, Vector};
    use raster_nest::util::NestConfig;

    fn rect_loop(x: f64, y: f64, w: f64, h: f64) -> Entity {
        Entity::new(Rect::new(x, y, x + w, y + h).extents_points().to_vec())
    }

    fn l_shape() -> Part {
        let outer = Entity::new(vec![
            Point(1.0, 2.0),
            Point(21.0, 2.0),
            Point(21.0, 7.0),
            Point(6.0, 7.0),
            Point(6.0, 17.0),
            Point(1.0, 17.0),
        ]);
        Part::new(outer, vec![]).with_nesting_meta_data(7, "L", Some(0.0))
    }

    fn ring() -> Part {
        Part::new(rect_loop(0.0, 0.0, 40.0, 40.0), vec![rect_loop(10.0, 10.0, 20.0, 20.0)])
            .with_nesting_meta_data(1, "ring", None)
    }

    #[test_case(0.0; "no gap")]
    #[test_case(2.0; "gap 2")]
    #[test_case(3.5; "gap 3.5")]
    fn nesting_bounds_are_inflated_by_half_the_gap(gap: f64) {
        for part in [l_shape(), ring()] {
            let bounds = part.bounds().unwrap();
            let nesting_bounds = part.nesting_bounds(gap).unwrap();
            assert!(approx_eq!(f64, nesting_bounds.width(), bounds.width() + gap));
            assert!(approx_eq!(f64, nesting_bounds.height(), bounds.height() + gap));
            assert!(approx_eq!(f64, nesting_bounds.x_min, bounds.x_min - gap / 2.0));
            assert!(approx_eq!(f64, nesting_bounds.y_max, bounds.y_max + gap / 2.0));
        }
    }

    #[test_case(0.0, Point(2.0, 2.0); "0 degrees")]
    #[test_case(30.0, Point(15.5, -4.0); "30 degrees")]
    #[test_case(90.0, Point(0.0, 0.0); "90 degrees")]
    #[test_case(135.0, Point(-7.25, 100.0); "135 degrees")]
    #[test_case(270.0, Point(33.0, 12.0); "270 degrees")]
    fn move_to_places_nesting_bounds_corner(angle: f64, target: Point) {
        let gap = 2.0;
        let mut part = l_shape();
        part.rotate(angle).move_to(target, gap);

        let nesting_bounds = part.nesting_bounds(gap).unwrap();
        assert!(approx_eq!(f64, nesting_bounds.x_min, target.0, epsilon = 1e-9));
        assert!(approx_eq!(f64, nesting_bounds.y_min, target.1, epsilon = 1e-9));
    }

    #[test]
    fn transforms_keep_bounds_and_holes_in_lockstep() {
        let mut part = ring();
        part.translate(Vector(5.0, -3.0)).rotate(45.0).translate(Vector(100.0, 0.0));

        for l in std::iter::once(part.outside_loop()).chain(part.inside_loops()) {
            let fresh = Rect::from_points(l.extents_points()).unwrap();
            assert_eq!(l.bounds(), Some(fresh));
        }
        let outer = part.outside_loop().bounds().unwrap();
        let hole = part.inside_loops()[0].bounds().unwrap();
        assert!(outer.contains_rect(&hole));
        assert!(approx_eq!(f64, part.area(), 40.0 * 40.0 - 20.0 * 20.0, epsilon = 1e-6));
    }

    #[test]
    fn rotation_annotation_is_normalized() {
        let mut part = l_shape().with_nesting_meta_data(7, "L", Some(350.0));
        part.rotate(20.0);
        assert!(approx_eq!(f64, part.rotation().unwrap(), 10.0, epsilon = 1e-9));

        let mut untracked = ring();
        untracked.rotate(90.0);
        assert_eq!(untracked.rotation(), None);
    }

    #[test]
    fn degenerate_loops_have_no_bounds() {
        assert_eq!(Entity::new(vec![]).bounds(), None);
        assert_eq!(Entity::new(vec![Point(1.0, 1.0)]).bounds(), None);
        let mut part = Part::new(Entity::new(vec![Point(1.0, 1.0)]), vec![]);
        assert_eq!(part.nesting_bounds(2.0), None);
        //moving a part without bounds is a no-op
        part.move_to(Point(50.0, 50.0), 2.0);
        assert_eq!(part.outside_loop().extents_points(), &[Point(1.0, 1.0)]);
        assert!(!part.collides_with(&Point(1.0, 1.0)));
    }

    #[test]
    fn shared_edges_belong_to_one_loop_only() {
        let left = rect_loop(0.0, 0.0, 10.0, 10.0);
        let right = rect_loop(10.0, 0.0, 10.0, 10.0);
        let above = rect_loop(0.0, 10.0, 10.0, 10.0);

        let on_vertical_edge = Point(10.0, 5.0);
        assert!(!left.collides_with(&on_vertical_edge));
        assert!(right.collides_with(&on_vertical_edge));

        let on_horizontal_edge = Point(5.0, 10.0);
        assert!(!left.collides_with(&on_horizontal_edge));
        assert!(above.collides_with(&on_horizontal_edge));

        assert!(left.collides_with(&Point(0.0, 0.0)));
        assert!(!left.collides_with(&Point(10.0, 10.0)));
    }

    #[test]
    fn holes_are_not_material() {
        let part = ring();
        assert!(part.collides_with(&Point(5.0, 5.0)));
        assert!(!part.collides_with(&Point(20.0, 20.0)));
        assert!(!part.collides_with(&Point(50.0, 20.0)));
    }

    #[test]
    fn boundary_distance_and_closest_point() {
        let square = rect_loop(0.0, 0.0, 10.0, 10.0);
        assert!(approx_eq!(f64, square.distance_to(&Point(5.0, 5.0)), 5.0));
        assert!(approx_eq!(f64, square.distance_to(&Point(2.0, 5.0)), 2.0));
        assert!(approx_eq!(f64, square.distance_to(&Point(13.0, 14.0)), 5.0));
        assert_eq!(square.closest_point_to(Point(15.0, 5.0)), Some(Point(10.0, 5.0)));
        assert_eq!(Entity::new(vec![]).closest_point_to(Point(0.0, 0.0)), None);
    }

    #[test]
    fn circles_are_sampled_around_the_circle() {
        let circle = Entity::circle(Point(5.0, 5.0), 4.0, 32);
        assert_eq!(circle.n_points(), 32);
        assert_eq!(circle.circle_meta().unwrap().diameter, 4.0);
        for p in circle.extents_points() {
            assert!(p.distance(Point(5.0, 5.0)) >= 2.0);
        }
        assert!(circle.collides_with(&Point(5.0, 5.0)));
        assert!(approx_eq!(f64, circle.distance_to(&Point(5.0, 5.0)), 2.0, epsilon = 1e-9));
    }

    #[test_case(-90.0, 270.0)]
    #[test_case(720.0, 0.0)]
    #[test_case(45.0, 45.0)]
    #[test_case(-360.0, 0.0)]
    fn angles_are_normalized(angle: f64, expected: f64) {
        assert!(approx_eq!(f64, normalize_angle(angle), expected));
    }

    #[test_case(90.0, vec![0.0, 90.0, 180.0, 270.0])]
    #[test_case(360.0, vec![0.0])]
    #[test_case(100.0, vec![0.0, 100.0, 200.0, 300.0])]
    #[test_case(120.0, vec![0.0, 120.0, 240.0])]
    fn rotations_are_evenly_spaced_from_zero(step: f64, expected: Vec<f64>) {
        let config = NestConfig {
            rotation_step: step,
            ..NestConfig::default()
        };
        assert_eq!(config.rotations(), expected);
    }

    #[test]
    fn invalid_configs_are_rejected() {
        let valid = NestConfig::default();
        assert!(valid.validate().is_ok());

        let invalid = [
            NestConfig {
                dot_pitch: 0.0,
                ..valid
            },
            NestConfig {
                part_to_part_gap: -1.0,
                ..valid
            },
            NestConfig {
                part_to_sheet_gap: -0.5,
                ..valid
            },
            NestConfig {
                rotation_step: 0.0,
                ..valid
            },
            NestConfig {
                rotation_step: 400.0,
                ..valid
            },
        ];
        for config in invalid {
            assert!(config.validate().is_err(), "{config:?} should be invalid");
        }
    }

    #[test_case((-5.0, 5.0), (15.0, 5.0), true; "crossing")]
    #[test_case((2.0, 2.0), (3.0, 3.0), true; "fully inside")]
    #[test_case((5.0, 20.0), (5.0, 5.0), true; "entering from the top")]
    #[test_case((0.0, 0.0), (10.0, 0.0), false; "along the boundary")]
    #[test_case((-5.0, 5.0), (0.0, 10.0), false; "touching a corner")]
    #[test_case((20.0, 0.0), (20.0, 10.0), false; "outside")]
    #[test_case((-1.0, 0.5), (0.5, -1.0), false; "cutting past a corner")]
    fn edge_collides_with_rect_interior(start: (f64, f64), end: (f64, f64), expected: bool) {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let edge = Edge::new(Point(start.0, start.1), Point(end.0, end.1));
        assert_eq!(rect.collides_with(&edge), expected);
    }
}
