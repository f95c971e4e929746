#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use itertools::Itertools;
    use test_case::test_case;

    use raster_nest::entities::Entity;
    use raster_nest::geometry::geo_traits::CollidesWith;
    use raster_nest::geometry::primitives::{Point, Rect};
    use raster_nest::raster::{
        GridEvaluator, LatticeKey, NoFitRasterEngine, ParallelEvaluator, Raster,
        SequentialEvaluator, generate_grid, raster_difference,
    };
    use raster_nest::util::GridBackend;

    fn keys(raster: &Raster) -> HashSet<LatticeKey> {
        raster.keys().collect()
    }

    fn triangle() -> Entity {
        Entity::new(vec![Point(3.0, 1.0), Point(17.0, 4.0), Point(6.0, 15.0)])
    }

    #[test]
    fn grid_rows_are_spaced_by_pitch() {
        let grid = generate_grid(Rect::new(0.0, 0.0, 10.0, 10.0), 2.0);
        assert_eq!(grid.len(), 36);
        //starts in the top left corner
        assert_eq!(grid[0], Point(0.0, 10.0));

        for (_, row) in &grid.iter().chunk_by(|p| p.1.to_bits()) {
            let xs = row.map(|p| p.0).sorted_by(f64::total_cmp).collect_vec();
            assert_eq!(xs, vec![0.0, 2.0, 4.0, 6.0, 8.0, 10.0]);
        }
        let ys = grid.iter().map(|p| p.1).dedup().collect_vec();
        assert_eq!(ys, vec![10.0, 8.0, 6.0, 4.0, 2.0, 0.0]);
        assert!(grid
            .iter()
            .all(|p| p.0 >= 0.0 && p.0 <= 10.0 && p.1 >= 0.0 && p.1 <= 10.0));
    }

    #[test]
    fn grid_rows_alternate_direction_without_filling_the_last_gap() {
        let grid = generate_grid(Rect::new(0.0, 0.0, 5.0, 3.0), 2.0);
        assert_eq!(
            grid,
            vec![
                Point(0.0, 3.0),
                Point(2.0, 3.0),
                Point(4.0, 3.0),
                Point(5.0, 1.0),
                Point(3.0, 1.0),
                Point(1.0, 1.0),
            ]
        );
    }

    #[test]
    fn degenerate_region_yields_single_dot() {
        let grid = generate_grid(Rect::new(4.0, 4.0, 4.0, 4.0), 1.0);
        assert_eq!(grid, vec![Point(4.0, 4.0)]);
    }

    #[test]
    fn raster_difference_identities() {
        let a = Raster::sample(Rect::new(0.0, 0.0, 4.0, 4.0), 1.0);
        let b = Raster::sample(Rect::new(0.0, 0.0, 2.0, 2.0), 1.0);
        let empty = Raster::empty(1.0);

        assert!(raster_difference(&a, &a).is_empty());
        assert_eq!(raster_difference(&a, &empty), a);

        let diff = raster_difference(&a, &b);
        assert_eq!(diff.len(), 25 - 9);
        assert!(keys(&diff).is_disjoint(&keys(&b)));
        assert!(keys(&diff).is_subset(&keys(&a)));
    }

    #[test]
    fn raster_difference_absorbs_float_noise() {
        let a = Raster::from_dots(vec![Point(0.1 + 0.2, 0.7), Point(0.5, 0.5)], 0.1);
        let b = Raster::from_dots(vec![Point(0.3, 0.7000000000001)], 0.1);
        assert_eq!(raster_difference(&a, &b).dots(), &[Point(0.5, 0.5)]);
    }

    #[test]
    fn sampled_shapes_only_contain_inner_dots() {
        let t = triangle();
        let dots = Raster::sample_shape(&t, 1.0);
        assert!(!dots.is_empty());
        assert!(dots.dots().iter().all(|d| t.collides_with(d)));
    }

    #[test]
    fn no_fit_raster_of_two_rectangles() {
        let engine = NoFitRasterEngine::new(1.0, SequentialEvaluator);
        let stationary = Rect::new(2.0, 2.0, 14.0, 14.0);
        let orbiting = Rect::new(0.0, 0.0, 12.0, 12.0);
        let forbidden = keys(&engine.no_fit_raster(&stationary, &orbiting));

        //every translation in [-9, 13]² makes the rectangles share a dot
        assert_eq!(forbidden.len(), 23 * 23);
        assert!(forbidden.contains(&LatticeKey(-9, -9)));
        assert!(forbidden.contains(&LatticeKey(13, 13)));
        //touching rectangles do not overlap
        assert!(!forbidden.contains(&LatticeKey(14, 2)));
        assert!(!forbidden.contains(&LatticeKey(-10, 2)));
        assert!(!forbidden.contains(&LatticeKey(2, 14)));
    }

    #[test_case(1.0; "pitch 1")]
    #[test_case(0.5; "pitch 0.5")]
    #[test_case(2.0; "pitch 2")]
    fn no_fit_raster_contains_every_coincidence(pitch: f64) {
        let engine = NoFitRasterEngine::new(pitch, SequentialEvaluator);
        let stationary = triangle();
        let orbiting = Entity::new(vec![
            Point(0.0, 0.0),
            Point(4.0, 0.0),
            Point(4.0, 3.0),
            Point(1.0, 5.0),
        ]);
        let forbidden = keys(&engine.no_fit_raster(&stationary, &orbiting));

        let s_dots = Raster::sample_shape(&stationary, pitch);
        let o_dots = Raster::sample_shape(&orbiting, pitch);
        let o_min = LatticeKey::new(o_dots.min_point().unwrap(), pitch);
        for s in s_dots.keys() {
            for o in o_dots.keys() {
                let b = s + o_min - o;
                assert!(forbidden.contains(&b), "{b:?} should be forbidden");
            }
        }
    }

    #[test]
    fn finer_pitch_detects_at_least_the_same_coincidences() {
        let stationary = triangle();
        let orbiting = Rect::new(0.0, 0.0, 6.0, 4.0);

        let coarse = NoFitRasterEngine::new(2.0, SequentialEvaluator).no_fit_raster(&stationary, &orbiting);
        let fine = NoFitRasterEngine::new(1.0, SequentialEvaluator).no_fit_raster(&stationary, &orbiting);

        let coarse_points = coarse.dots().iter().map(|d| LatticeKey::new(*d, 1.0)).collect::<HashSet<_>>();
        assert!(!coarse_points.is_empty());
        assert!(coarse_points.is_subset(&keys(&fine)));
    }

    #[test]
    fn degenerate_shapes_yield_empty_rasters() {
        let engine = NoFitRasterEngine::new(1.0, SequentialEvaluator);
        let degenerate = Entity::new(vec![Point(1.0, 1.0)]);
        assert!(engine.no_fit_raster(&degenerate, &triangle()).is_empty());
        assert!(engine.no_fit_raster(&triangle(), &degenerate).is_empty());
    }

    #[test_case(GridBackend::Sequential; "sequential")]
    #[test_case(GridBackend::Parallel; "parallel")]
    fn backends_produce_identical_rasters(backend: GridBackend) {
        let reference = NoFitRasterEngine::new(1.0, SequentialEvaluator)
            .no_fit_raster(&triangle(), &Rect::new(0.0, 0.0, 3.0, 5.0));
        let other = NoFitRasterEngine::new(1.0, backend)
            .no_fit_raster(&triangle(), &Rect::new(0.0, 0.0, 3.0, 5.0));
        assert_eq!(reference, other);
    }

    #[test]
    fn evaluators_fill_every_cell() {
        let predicate = |i: usize, j: usize| (i * j) % 2 == 1;
        let sequential = SequentialEvaluator.evaluate(3, 4, predicate);
        let parallel = ParallelEvaluator.evaluate(3, 4, predicate);
        assert_eq!(sequential, parallel);
        assert_eq!(sequential.shape(), &[3, 4]);
        assert!(sequential[[1, 3]]);
        assert!(!sequential[[2, 3]]);
    }
}
