use foundation::math::Orthographic;
use rand::SeedableRng;
use rand::rngs::StdRng;
use runtime::{Transform2D, ViewState};
use scene::{FeatureGeometry, LoadState, World};

use crate::arc::{ArcPath, ArcSynthesizer};
use crate::path::{DrawPath, PathGenerator, PathOp};
use crate::scale::{LinearScale, SqrtColorScale};
use crate::symbology::{
    ARC_STYLE, CITY_STYLE, LAND_LINE_WIDTH, LAND_RAMP_HI, LAND_RAMP_LO, LAND_STROKE, LayerStyle,
    SEA_STYLE,
};

/// One backend-agnostic drawing instruction.
///
/// The compositor emits these in draw order; the canvas backend replays
/// them verbatim.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    SetTransform(Transform2D),
    Path { path: DrawPath, style: LayerStyle },
}

/// Dataset wiring for the compositor: which collections feed which layers
/// and how arcs are weighted.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositorConfig {
    pub region_collection: String,
    pub city_collection: String,
    pub weight_key: String,
    pub arc_weight_threshold: f64,
    pub sky_scale_factor: f64,
    /// Fixed per data load so every draw cycle replays the same arc set.
    pub arc_seed: u64,
    pub marker_radius_range: (f64, f64),
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            region_collection: "countries".to_string(),
            city_collection: "cities".to_string(),
            weight_key: "POP_MAX".to_string(),
            arc_weight_threshold: 5_000_000.0,
            sky_scale_factor: 2.0,
            arc_seed: 0,
            marker_radius_range: (0.0, 10.0),
        }
    }
}

/// Turns a loaded world plus the current view into an ordered command list.
///
/// Layer order is fixed: clear, group transform, sea disk, region fills,
/// connector arcs, city markers. Anything but a successful load yields an
/// empty list.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneCompositor {
    config: CompositorConfig,
}

impl SceneCompositor {
    pub fn new(config: CompositorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn compose(&self, load: &LoadState, view: &ViewState) -> Vec<DrawCommand> {
        let Some(world) = load.world() else {
            return Vec::new();
        };
        let projection = view.projection.to_projection();
        let generator = PathGenerator::new(&projection);

        let mut commands = vec![
            DrawCommand::Clear,
            DrawCommand::SetTransform(view.transform),
        ];

        // Sea disk under everything.
        commands.push(DrawCommand::Path {
            path: generator.sphere_path(),
            style: SEA_STYLE,
        });

        self.compose_regions(world, &generator, &mut commands);
        self.compose_arcs(world, &projection, &mut commands);
        self.compose_markers(world, &generator, &mut commands);

        commands
    }

    fn compose_regions(
        &self,
        world: &World,
        generator: &PathGenerator<'_>,
        commands: &mut Vec<DrawCommand>,
    ) {
        let cfg = &self.config;
        let extent = world
            .property_extent(&cfg.region_collection, &cfg.weight_key)
            .unwrap_or((0.0, 1.0));
        let ramp = SqrtColorScale::new(extent, LAND_RAMP_LO, LAND_RAMP_HI);

        for feature in world.collection(&cfg.region_collection) {
            let path = generator.path_for(feature);
            if path.is_empty() {
                continue;
            }
            let weight = feature.number_property(&cfg.weight_key).unwrap_or(extent.0);
            commands.push(DrawCommand::Path {
                path,
                style: LayerStyle::filled(ramp.color(weight))
                    .with_stroke(LAND_STROKE, LAND_LINE_WIDTH),
            });
        }
    }

    fn compose_arcs(
        &self,
        world: &World,
        projection: &Orthographic,
        commands: &mut Vec<DrawCommand>,
    ) {
        let cfg = &self.config;
        let synthesizer = ArcSynthesizer::new(
            cfg.weight_key.clone(),
            cfg.arc_weight_threshold,
            cfg.sky_scale_factor,
        );
        // Re-seeding every compose keeps the arc set stable across frames.
        let mut rng = StdRng::seed_from_u64(cfg.arc_seed);
        let cities = world.collection(&cfg.city_collection);

        for arc in synthesizer.synthesize(cities, projection, &mut rng) {
            let ops = match arc {
                ArcPath::Bezier {
                    start,
                    ctrl1,
                    ctrl2,
                    end,
                } => vec![
                    PathOp::MoveTo(start),
                    PathOp::BezierTo {
                        ctrl1,
                        ctrl2,
                        to: end,
                    },
                ],
                ArcPath::Segment { start, end } => {
                    vec![PathOp::MoveTo(start), PathOp::LineTo(end)]
                }
            };
            commands.push(DrawCommand::Path {
                path: DrawPath { ops },
                style: ARC_STYLE,
            });
        }
    }

    fn compose_markers(
        &self,
        world: &World,
        generator: &PathGenerator<'_>,
        commands: &mut Vec<DrawCommand>,
    ) {
        let cfg = &self.config;
        let extent = world
            .property_extent(&cfg.city_collection, &cfg.weight_key)
            .unwrap_or((0.0, 1.0));
        let radius = LinearScale::new(extent, cfg.marker_radius_range);

        for feature in world.collection(&cfg.city_collection) {
            let FeatureGeometry::Point { position } = feature.geometry else {
                continue;
            };
            let weight = feature.number_property(&cfg.weight_key).unwrap_or(extent.0);
            let path = generator.marker(position, radius.apply(weight));
            if path.is_empty() {
                continue;
            }
            commands.push(DrawCommand::Path {
                path,
                style: CITY_STYLE,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{CompositorConfig, DrawCommand, SceneCompositor};
    use crate::path::PathOp;
    use crate::symbology::{ARC_STYLE, CITY_STYLE, SEA_STYLE};
    use foundation::math::{GeoPoint, Vec2};
    use runtime::{ProjectionState, ViewState, ZoomBounds};
    use scene::{Feature, LoadError, LoadState, PropertyValue, World};

    fn view() -> ViewState {
        // Polar center keeps the whole test dataset on the visible side.
        ViewState::new(
            ProjectionState::centered_on(70.0, 90.0, 300.0, Vec2::new(480.0, 360.0)),
            ZoomBounds::default(),
        )
    }

    fn city(lon: f64, lat: f64, pop: f64) -> Feature {
        Feature::point(GeoPoint::new(lon, lat))
            .with_properties(vec![("POP_MAX".to_string(), PropertyValue::Number(pop))])
    }

    fn country(lon0: f64, lat0: f64, pop: f64) -> Feature {
        Feature::polygon(vec![vec![
            GeoPoint::new(lon0, lat0),
            GeoPoint::new(lon0 + 10.0, lat0),
            GeoPoint::new(lon0 + 10.0, lat0 + 10.0),
            GeoPoint::new(lon0, lat0 + 10.0),
            GeoPoint::new(lon0, lat0),
        ]])
        .with_properties(vec![("POP_MAX".to_string(), PropertyValue::Number(pop))])
    }

    fn loaded_world() -> LoadState {
        let mut world = World::new();
        world.insert_collection(
            "countries",
            vec![country(0.0, 50.0, 60_000_000.0), country(130.0, 30.0, 125_000_000.0)],
        );
        world.insert_collection(
            "cities",
            vec![
                city(139.7494, 35.6869, 35_000_000.0),
                city(0.1278, 51.5074, 8_500_000.0),
                city(-74.0, 40.7, 19_000_000.0),
            ],
        );
        LoadState::Success(world)
    }

    fn compositor() -> SceneCompositor {
        SceneCompositor::new(CompositorConfig {
            arc_seed: 42,
            ..CompositorConfig::default()
        })
    }

    #[test]
    fn non_success_states_draw_nothing() {
        let compositor = compositor();
        let view = view();
        assert!(compositor.compose(&LoadState::Loading, &view).is_empty());

        let failed = LoadState::Failure(LoadError::Fetch {
            url: "map.json".to_string(),
            message: "404".to_string(),
        });
        let before = view;
        assert!(compositor.compose(&failed, &view).is_empty());
        // Failed loads leave the view (projection included) untouched.
        assert_eq!(view, before);
    }

    #[test]
    fn command_list_starts_with_clear_then_transform_then_sea() {
        let commands = compositor().compose(&loaded_world(), &view());
        assert!(commands.len() >= 3);
        assert_eq!(commands[0], DrawCommand::Clear);
        assert!(matches!(commands[1], DrawCommand::SetTransform(_)));
        assert!(matches!(
            &commands[2],
            DrawCommand::Path { style, .. } if *style == SEA_STYLE
        ));
    }

    #[test]
    fn layers_appear_in_fixed_order() {
        let commands = compositor().compose(&loaded_world(), &view());

        let mut last_fill_region = 0;
        let mut first_arc = usize::MAX;
        let mut first_city = usize::MAX;
        for (i, command) in commands.iter().enumerate() {
            let DrawCommand::Path { style, .. } = command else {
                continue;
            };
            if *style == ARC_STYLE {
                first_arc = first_arc.min(i);
            } else if *style == CITY_STYLE {
                first_city = first_city.min(i);
            } else if *style != SEA_STYLE {
                last_fill_region = last_fill_region.max(i);
            }
        }

        assert!(last_fill_region > 0, "expected region fills");
        assert!(first_city < usize::MAX, "expected city markers");
        assert!(last_fill_region < first_city);
        if first_arc < usize::MAX {
            assert!(last_fill_region < first_arc);
            assert!(first_arc < first_city);
        }
    }

    #[test]
    fn composition_is_stable_across_draw_cycles() {
        let compositor = compositor();
        let load = loaded_world();
        let view = view();
        assert_eq!(
            compositor.compose(&load, &view),
            compositor.compose(&load, &view)
        );
    }

    #[test]
    fn marker_radii_follow_the_weight_extent() {
        let commands = compositor().compose(&loaded_world(), &view());
        let radii: Vec<f64> = commands
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Path { path, style } if *style == CITY_STYLE => {
                    match path.ops.as_slice() {
                        [PathOp::Circle { radius, .. }] => Some(*radius),
                        _ => None,
                    }
                }
                _ => None,
            })
            .collect();

        assert_eq!(radii.len(), 3);
        // Largest population maps to the top of the range, smallest to the
        // bottom.
        assert_eq!(radii[0], 10.0);
        assert_eq!(radii[1], 0.0);
        assert!(radii[2] > 0.0 && radii[2] < 10.0);
    }

    #[test]
    fn empty_world_draws_only_the_sea() {
        let commands = compositor().compose(&LoadState::Success(World::new()), &view());
        assert_eq!(commands.len(), 3);
        assert!(matches!(
            &commands[2],
            DrawCommand::Path { style, .. } if *style == SEA_STYLE
        ));
    }
}
