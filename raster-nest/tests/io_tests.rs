#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::time::Duration;

    use float_cmp::approx_eq;
    use itertools::Itertools;
    use test_case::test_case;

    use raster_nest::entities::{DesignDocumentPart, Entity, Nesting, Part};
    use raster_nest::geometry::geo_traits::{Bounded, CollidesWith, DistanceTo};
    use raster_nest::geometry::primitives::{Point, Rect};
    use raster_nest::io::export::export_outcome;
    use raster_nest::io::ext_repr::{ExtInstance, ExtLoop, ExtPart, ExtSolution};
    use raster_nest::io::import::{Importer, import_polygon_points};
    use raster_nest::io::svg::{SvgDrawOptions, outcome_to_svg};
    use raster_nest::nest::nest;
    use raster_nest::util::{NestConfig, ShapeModifyConfig};

    fn read_instance(path: &Path) -> ExtInstance {
        let file = std::fs::File::open(path).unwrap();
        serde_json::from_reader(std::io::BufReader::new(file)).unwrap()
    }

    fn ext_rect_part(id: u64, width: f64, height: f64) -> ExtPart {
        ExtPart {
            id,
            key: format!("rect_{id}"),
            layer: String::new(),
            rotation: None,
            outside_loop: ExtLoop::Rectangle {
                x_min: 0.0,
                y_min: 0.0,
                width,
                height,
            },
            inside_loops: vec![],
        }
    }

    #[test]
    fn loops_of_every_kind_are_parsed() {
        let json = r#"{
            "name": "kinds",
            "nesting": { "id": 7, "width": 50.0, "height": 40.0 },
            "parts": [
                {
                    "id": 1,
                    "outside_loop": { "type": "polygon", "data": [[0, 0], [10, 0], [10, 10], [0, 10], [0, 0]] },
                    "inside_loops": [{ "type": "circle", "data": { "center": [5, 5], "diameter": 4 } }]
                },
                {
                    "id": 2,
                    "key": "plate",
                    "layer": "cut",
                    "rotation": 450.0,
                    "outside_loop": { "type": "rectangle", "data": { "x_min": 1, "y_min": 2, "width": 3, "height": 4 } }
                }
            ]
        }"#;
        let ext_instance: ExtInstance = serde_json::from_str(json).unwrap();
        let importer = Importer::new(ShapeModifyConfig::default());
        let (nesting, parts) = importer.import_instance(&ext_instance).unwrap();

        assert_eq!(nesting.id, 7);
        assert!(nesting.already_nested_parts.is_empty());
        assert_eq!(parts.len(), 2);
        assert!(parts.iter().all(|dp| dp.nesting_id == 7));

        let first = &parts[0].part;
        //closing vertex stripped
        assert_eq!(first.outside_loop().n_points(), 4);
        assert_eq!(first.inside_loops().len(), 1);
        let circle = first.inside_loops()[0].circle_meta().unwrap();
        assert_eq!(circle.center, Point(5.0, 5.0));
        assert!(approx_eq!(f64, circle.diameter, 4.0));

        let second = &parts[1].part;
        assert_eq!(second.nesting_id(), 2);
        assert_eq!(second.outside_loop().nesting_key, "plate");
        assert_eq!(second.outside_loop().layer, "cut");
        assert!(approx_eq!(f64, second.rotation().unwrap(), 90.0));
        let bounds = second.bounds().unwrap();
        assert!(approx_eq!(f64, bounds.x_max, 4.0));
        assert!(approx_eq!(f64, bounds.y_max, 6.0));
    }

    #[test]
    fn duplicate_part_ids_are_rejected() {
        let json = r#"{
            "name": "duplicates",
            "nesting": { "id": 1, "width": 50.0, "height": 50.0 },
            "parts": [
                { "id": 3, "outside_loop": { "type": "rectangle", "data": { "x_min": 0, "y_min": 0, "width": 1, "height": 1 } } },
                { "id": 3, "outside_loop": { "type": "rectangle", "data": { "x_min": 0, "y_min": 0, "width": 2, "height": 2 } } }
            ]
        }"#;
        let ext_instance: ExtInstance = serde_json::from_str(json).unwrap();
        let importer = Importer::new(ShapeModifyConfig::default());
        assert!(importer.import_instance(&ext_instance).is_err());
    }

    #[test]
    fn design_part_ids_clashing_with_sheet_parts_are_rejected() {
        let json = r#"{
            "name": "clash",
            "nesting": {
                "id": 1, "width": 50.0, "height": 50.0,
                "already_nested_parts": [
                    { "id": 3, "outside_loop": { "type": "rectangle", "data": { "x_min": 2, "y_min": 2, "width": 4, "height": 4 } } }
                ]
            },
            "parts": [
                { "id": 3, "outside_loop": { "type": "rectangle", "data": { "x_min": 0, "y_min": 0, "width": 2, "height": 2 } } }
            ]
        }"#;
        let ext_instance: ExtInstance = serde_json::from_str(json).unwrap();
        let importer = Importer::new(ShapeModifyConfig::default());
        assert!(importer.import_instance(&ext_instance).is_err());
    }

    #[test_case(0.0, 10.0; "zero width")]
    #[test_case(10.0, -1.0; "negative height")]
    fn invalid_sheets_are_rejected(width: f64, height: f64) {
        let json = format!(
            r#"{{ "name": "sheet", "nesting": {{ "id": 1, "width": {width}, "height": {height} }}, "parts": [] }}"#
        );
        let ext_instance: ExtInstance = serde_json::from_str(&json).unwrap();
        let importer = Importer::new(ShapeModifyConfig::default());
        assert!(importer.import_instance(&ext_instance).is_err());
    }

    #[test]
    fn degenerate_polygons_are_rejected() {
        assert!(import_polygon_points(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)]).is_err());
        assert!(import_polygon_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).is_ok());
        let points = import_polygon_points(&[(0.0, 0.0), (1.0, 0.0), (1.0, 0.0), (1.0, 1.0)]).unwrap();
        assert_eq!(points.len(), 3);
    }

    #[test]
    fn rectangle_with_negative_size_is_rejected() {
        let importer = Importer::new(ShapeModifyConfig::default());
        assert!(importer.import_part(&ext_rect_part(1, -5.0, 5.0)).is_err());
    }

    #[cfg(feature = "shape-modification")]
    #[test]
    fn offset_inflates_outside_and_deflates_holes() {
        let importer = Importer::new(ShapeModifyConfig {
            clean_tolerance: None,
            offset: Some(1.0),
        });
        let ext_part = ExtPart {
            inside_loops: vec![ExtLoop::Rectangle {
                x_min: 10.0,
                y_min: 10.0,
                width: 20.0,
                height: 20.0,
            }],
            ..ext_rect_part(1, 40.0, 40.0)
        };
        let part = importer.import_part(&ext_part).unwrap();

        let outer = part.bounds().unwrap();
        assert!(approx_eq!(f64, outer.x_min, -1.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, outer.y_max, 41.0, epsilon = 1e-6));
        let hole = part.inside_loops()[0].bounds().unwrap();
        assert!(approx_eq!(f64, hole.x_min, 11.0, epsilon = 1e-6));
        assert!(approx_eq!(f64, hole.y_max, 29.0, epsilon = 1e-6));
        assert_eq!(part.nesting_id(), 1);
    }

    #[cfg(feature = "shape-modification")]
    #[test]
    fn offset_loops_keep_their_distance_at_the_corners() {
        let importer = Importer::new(ShapeModifyConfig {
            clean_tolerance: None,
            offset: Some(1.0),
        });
        let ext_part = ExtPart {
            inside_loops: vec![ExtLoop::Rectangle {
                x_min: 10.0,
                y_min: 10.0,
                width: 20.0,
                height: 20.0,
            }],
            ..ext_rect_part(1, 40.0, 40.0)
        };
        let part = importer.import_part(&ext_part).unwrap();

        let original_outer = Entity::new(Rect::new(0.0, 0.0, 40.0, 40.0).extents_points().to_vec());
        let original_hole = Entity::new(Rect::new(10.0, 10.0, 30.0, 30.0).extents_points().to_vec());
        for p in part.outside_loop().extents_points() {
            assert!(original_outer.distance_to(p) >= 1.0 - 1e-6);
        }
        for p in part.inside_loops()[0].extents_points() {
            assert!(original_hole.distance_to(p) >= 1.0 - 1e-6);
        }
        //corners are mitred, so the rounded offset lies within the outside loop
        assert!(part.outside_loop().collides_with(&Point(-0.7, -0.7)));
        assert!(part.outside_loop().collides_with(&Point(40.7, 40.7)));
    }

    #[cfg(feature = "shape-modification")]
    #[test]
    fn hole_vanishing_through_offset_is_dropped() {
        let importer = Importer::new(ShapeModifyConfig {
            clean_tolerance: None,
            offset: Some(2.0),
        });
        let ext_part = ExtPart {
            inside_loops: vec![ExtLoop::Rectangle {
                x_min: 10.0,
                y_min: 10.0,
                width: 3.0,
                height: 3.0,
            }],
            ..ext_rect_part(1, 40.0, 40.0)
        };
        let part = importer.import_part(&ext_part).unwrap();
        assert!(part.inside_loops().is_empty());
    }

    #[test]
    fn ring_solution_reports_embedded_parts() {
        let ext_instance = read_instance(Path::new("../assets/ring.json"));
        let config = NestConfig::default();
        let importer = Importer::new(config.shape_modify);
        let (nesting, parts) = importer.import_instance(&ext_instance).unwrap();

        let outcome = nest(&nesting, &parts, &config).unwrap();
        let solution = export_outcome(&outcome, Duration::from_millis(12));

        assert_eq!(solution.nesting_id, 1000);
        assert_eq!(solution.run_time_ms, 12);
        assert!(solution.not_nested.is_empty());
        assert_eq!(solution.nested_parts.len(), 2);
        assert_eq!(solution.embedded_parts.get(&1), Some(&vec![2]));
        let small = solution.nested_parts.iter().find(|p| p.id == 2).unwrap();
        assert!(small.newly_nested);
        assert_eq!(small.embedded_in, Some(1));
        assert_eq!(small.outside_loop.len(), 4);

        let json = serde_json::to_string(&solution).unwrap();
        assert!(json.contains("\"embedded_parts\""));
        let parsed: ExtSolution = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.embedded_parts, solution.embedded_parts);
    }

    #[test]
    fn previously_nested_parts_are_exported_without_location() {
        let ext_instance = read_instance(Path::new("../assets/mixed.json"));
        let config = NestConfig::default();
        let importer = Importer::new(config.shape_modify);
        let (nesting, parts) = importer.import_instance(&ext_instance).unwrap();

        let outcome = nest(&nesting, &parts, &config).unwrap();
        let solution = export_outcome(&outcome, Duration::ZERO);

        let ids = solution.nested_parts.iter().map(|p| p.id).sorted().collect_vec();
        assert!(ids.contains(&50));
        assert!(!ids.contains(&90));
        let previous = solution.nested_parts.iter().find(|p| p.id == 50).unwrap();
        assert!(!previous.newly_nested);
        assert_eq!(previous.location, None);
        assert_eq!(
            solution.nested_parts.len() + solution.not_nested.len(),
            parts.len() + 1
        );
    }

    #[test_case("../assets/ring.json"; "ring")]
    #[test_case("../assets/mixed.json"; "mixed")]
    fn svg_contains_every_part(path: &str) {
        let ext_instance = read_instance(Path::new(path));
        let config = NestConfig::default();
        let importer = Importer::new(config.shape_modify);
        let (nesting, parts) = importer.import_instance(&ext_instance).unwrap();

        let outcome = nest(&nesting, &parts, &config).unwrap();
        let svg = outcome_to_svg(&outcome, SvgDrawOptions::default(), &ext_instance.name).to_string();

        assert!(svg.contains(&format!("sheet_{}", nesting.id)));
        for record in &outcome.newly_nested {
            assert!(svg.contains(&format!("part_{}", record.design_part.part_id())));
        }
    }

    #[test]
    fn part_ids_shared_with_sheet_parts_are_exported_separately() {
        let mut nesting = Nesting::new(1000, 100.0, 100.0);
        let previous = Entity::new(Rect::new(3.0, 3.0, 13.0, 13.0).extents_points().to_vec());
        nesting
            .already_nested_parts
            .push(Part::new(previous, vec![]).with_nesting_meta_data(1, "previous", Some(0.0)));
        let design = Entity::new(Rect::new(0.0, 0.0, 10.0, 10.0).extents_points().to_vec());
        let parts = vec![DesignDocumentPart::new(
            1000,
            Part::new(design, vec![]).with_nesting_meta_data(1, "design", Some(0.0)),
        )];

        let outcome = nest(&nesting, &parts, &NestConfig::default()).unwrap();
        let solution = export_outcome(&outcome, Duration::ZERO);

        assert_eq!(solution.nested_parts.len(), 2);
        let (newly, previously): (Vec<_>, Vec<_>) =
            solution.nested_parts.iter().partition(|p| p.newly_nested);
        assert_eq!(newly.len(), 1);
        assert_eq!(previously.len(), 1);
        assert_eq!(previously[0].location, None);
        assert_eq!(previously[0].rotation, None);
        assert_eq!(newly[0].location, Some((14.0, 2.0)));
    }
}
