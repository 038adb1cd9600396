use approx::assert_relative_eq;
use chart_morph::core::{BoundingBox, Coordinates, FieldValue, Record};
use chart_morph::model::{
    AxisDefinition, CastAxes, CastDefinition, CharacterDefinition, ChartCatalog, ChartDefinition,
    LayoutKind, PairDefinition, TransitionDefinition, TransitionKind,
};
use chart_morph::render::{Color, Drawable, LayerRole, MountPoint, RecordingSurface};
use chart_morph::{ChartError, ChartModel, TransitionChart, TransitionState};
use chrono::{TimeZone, Utc};

fn month(month: u32) -> FieldValue {
    FieldValue::Date(
        Utc.with_ymd_and_hms(2024, month, 1, 0, 0, 0)
            .single()
            .expect("valid date"),
    )
}

fn revenue_chart(name: &str, x: Vec<FieldValue>, values: &[f64]) -> ChartDefinition {
    let data = x
        .into_iter()
        .zip(values)
        .map(|(x, value)| {
            let mut record = Record::new();
            record.insert("series".to_owned(), FieldValue::from("revenue"));
            record.insert("month".to_owned(), x);
            record.insert("amount".to_owned(), FieldValue::Number(*value));
            record
        })
        .collect();

    ChartDefinition {
        name: Some(name.to_owned()),
        data,
        axes: vec![
            AxisDefinition::new("x", "month"),
            AxisDefinition::new("y", "amount"),
        ],
        cast: CastDefinition {
            field: "series".to_owned(),
            axes: CastAxes::default(),
            characters: vec![CharacterDefinition::new(
                "revenue",
                Color::from_hex("#2ca02c").expect("color"),
            )],
        },
        annotations: Vec::new(),
        design: None,
        layout: LayoutKind::Area,
    }
}

fn morph_definition() -> TransitionDefinition {
    TransitionDefinition::new("quarter-to-bimester", TransitionKind::Morph, "a", "b")
        .with_character(PairDefinition::same("revenue"))
        .with_axis(PairDefinition::same("x"))
        .with_axis(PairDefinition::same("y"))
}

struct Stage {
    surface: RecordingSurface,
    catalog: ChartCatalog,
    mount: MountPoint,
}

fn stage() -> Stage {
    let mut surface = RecordingSurface::new();
    let a_node = surface.add_mount(BoundingBox::new(0.0, 0.0, 1080.0, 720.0));
    let b_node = surface.add_mount(BoundingBox::new(100.0, 50.0, 1080.0, 720.0));
    let stage_node = surface.add_mount(BoundingBox::new(0.0, 0.0, 1080.0, 720.0));

    let mut catalog = ChartCatalog::new();
    catalog
        .build(
            &revenue_chart("a", vec![month(1), month(2), month(3)], &[10.0, 20.0, 30.0]),
            MountPoint::measure(&surface, a_node).expect("mount a"),
        )
        .expect("chart a");
    catalog
        .build(
            &revenue_chart("b", vec![month(1), month(2)], &[15.0, 25.0]),
            MountPoint::measure(&surface, b_node).expect("mount b"),
        )
        .expect("chart b");

    let mount = MountPoint::measure(&surface, stage_node).expect("stage mount");
    Stage {
        surface,
        catalog,
        mount,
    }
}

#[test]
fn revenue_outline_blends_between_resampled_outlines() {
    let stage = stage();
    let transition = stage
        .catalog
        .transition(&morph_definition(), stage.mount)
        .expect("transition");
    let TransitionChart::Morph(morph) = &transition else {
        panic!("expected a morph transition");
    };

    let character = &morph.characters()[0];
    let interpolator = character.interpolator();
    assert_eq!(interpolator.resampled_len(), 6);

    let frame = transition.frame_at(0.5).expect("frame");
    let layer = frame
        .layers
        .iter()
        .find(|layer| layer.role == LayerRole::Characters)
        .expect("character layer");
    let blended = &layer.paths[0].path;
    assert_eq!(blended.len(), 6);

    let (from, to) = interpolator.resampled();
    for ((mid, start), end) in blended.points().iter().zip(from.points()).zip(to.points()) {
        assert_relative_eq!(mid.x, (start.x + end.x) / 2.0, epsilon = 1e-9);
        assert_relative_eq!(mid.y, (start.y + end.y) / 2.0, epsilon = 1e-9);
        assert!(mid.x >= start.x.min(end.x) && mid.x <= start.x.max(end.x));
        assert!(mid.y >= start.y.min(end.y) && mid.y <= start.y.max(end.y));
    }
    assert_eq!(layer.paths[0].style.fill, Some(character.from().color()));
}

#[test]
fn boundary_positions_draw_each_chart_outline() {
    let stage = stage();
    let transition = stage
        .catalog
        .transition(&morph_definition(), stage.mount)
        .expect("transition");
    let from = stage.catalog.get("a").expect("a").character("revenue").expect("revenue");
    let to = stage.catalog.get("b").expect("b").character("revenue").expect("revenue");

    let outline_at = |position: f64| {
        let frame = transition.frame_at(position).expect("frame");
        frame
            .layers
            .into_iter()
            .find(|layer| layer.role == LayerRole::Characters)
            .expect("character layer")
            .paths
            .remove(0)
            .path
    };
    assert_eq!(&outline_at(0.0), from.path());
    assert_eq!(&outline_at(1.0), to.path());
}

#[test]
fn axes_use_the_blended_domain() {
    let stage = stage();
    let transition = stage
        .catalog
        .transition(&morph_definition(), stage.mount)
        .expect("transition");
    let TransitionChart::Morph(morph) = &transition else {
        panic!("expected a morph transition");
    };

    let y = morph
        .axes()
        .iter()
        .find(|axis| axis.from().name() == "y")
        .expect("y pair");
    let layer = y
        .frame_layer(0.5, transition.design().plot_origin(), transition.design())
        .expect("y layer");
    let labels: Vec<&str> = layer.texts.iter().map(|text| text.text.as_str()).collect();
    // 10..30 blended with 15..25 gives 12.5..27.5, ticked every 2.
    assert!(labels.contains(&"14"));
    assert!(labels.contains(&"26"));
    assert!(!labels.contains(&"12"));
    assert!(!labels.contains(&"28"));
}

#[test]
fn stage_travels_between_mount_positions() {
    let stage = stage();
    let transition = stage
        .catalog
        .transition(&morph_definition(), stage.mount)
        .expect("transition");

    assert_eq!(transition.initial_coordinates(), Coordinates::new(0.0, 0.0));
    assert_eq!(transition.offset_at(0.0), Coordinates::new(0.0, 0.0));
    assert_eq!(transition.offset_at(0.5), Coordinates::new(50.0, 25.0));
    assert_eq!(transition.offset_at(1.5), Coordinates::new(150.0, 75.0));
    assert_eq!(
        transition.frame_at(0.5).expect("frame").offset,
        Coordinates::new(50.0, 25.0)
    );
}

#[test]
fn redraw_at_same_position_is_idempotent() {
    let mut stage = stage();
    let mut transition = stage
        .catalog
        .transition(&morph_definition(), stage.mount)
        .expect("transition");
    assert_eq!(transition.state(), TransitionState::Built);

    transition
        .draw_at(0.3, &mut stage.surface)
        .expect("first draw");
    let once = stage.surface.descendant_count(stage.mount.node);
    let paths = stage.surface.paths(stage.mount.node);

    transition.draw(&mut stage.surface).expect("second draw");
    assert_eq!(stage.surface.descendant_count(stage.mount.node), once);
    let again = stage.surface.paths(stage.mount.node);
    assert_eq!(again.len(), paths.len());
    for (left, right) in again.iter().zip(&paths) {
        assert_eq!(left.path, right.path);
        assert_eq!(left.style, right.style);
        assert_eq!(left.offset, right.offset);
    }
    assert_eq!(transition.state(), TransitionState::Drawing { position: 0.3 });
}

#[test]
fn scrubbing_backwards_matches_a_fresh_draw() {
    let mut stage = stage();
    let mut transition = stage
        .catalog
        .transition(&morph_definition(), stage.mount)
        .expect("transition");

    transition.draw_at(0.2, &mut stage.surface).expect("draw 0.2");
    let at_two = stage.surface.paths(stage.mount.node);
    transition.draw_at(0.9, &mut stage.surface).expect("draw 0.9");
    transition.draw_at(0.2, &mut stage.surface).expect("draw 0.2 again");

    let again = stage.surface.paths(stage.mount.node);
    assert_eq!(again.len(), at_two.len());
    for (left, right) in again.iter().zip(&at_two) {
        assert_eq!(left.path, right.path);
        assert_eq!(left.offset, right.offset);
    }
}

#[test]
fn hide_then_draw_is_lossless() {
    let mut stage = stage();
    let mut transition = stage
        .catalog
        .transition(&morph_definition(), stage.mount)
        .expect("transition");

    transition.draw_at(0.6, &mut stage.surface).expect("draw");
    let drawn = stage.surface.descendant_count(stage.mount.node);

    transition.hide(&mut stage.surface).expect("hide");
    assert_eq!(transition.state(), TransitionState::Hidden);
    assert_eq!(stage.surface.descendant_count(stage.mount.node), 0);

    transition.draw(&mut stage.surface).expect("redraw");
    assert_eq!(stage.surface.descendant_count(stage.mount.node), drawn);
}

#[test]
fn geometry_error_surfaces_at_draw_and_leaves_stage_cleared() {
    let mut stage = stage();
    let mut categorical = revenue_chart("c", vec![month(1), month(2)], &[1.0, 2.0]);
    for (record, label) in categorical.data.iter_mut().zip(["jan", "feb"]) {
        record.insert("month".to_owned(), FieldValue::from(label));
    }
    let c_node = stage.surface.add_mount(BoundingBox::new(0.0, 0.0, 1080.0, 720.0));
    let c_mount = MountPoint::measure(&stage.surface, c_node).expect("mount c");
    let chart_c = ChartModel::build(&categorical, c_mount).expect("chart c");
    let chart_a = stage.catalog.get("a").expect("a");

    let good = stage
        .catalog
        .transition(&morph_definition(), stage.mount)
        .expect("good transition");
    good.draw(&mut stage.surface).expect("good draw");
    assert!(stage.surface.descendant_count(stage.mount.node) > 0);

    let definition = TransitionDefinition::new("bad", TransitionKind::Morph, "a", "c")
        .with_axis(PairDefinition::same("x"));
    let bad = TransitionChart::build(&definition, chart_a, &chart_c, stage.mount)
        .expect("pairing resolves at build");
    let err = bad.draw(&mut stage.surface).expect_err("kind mismatch at draw");

    assert!(matches!(err, ChartError::DomainKindMismatch { .. }));
    assert_eq!(stage.surface.descendant_count(stage.mount.node), 0);
    assert_eq!(bad.state(), TransitionState::Hidden);
}

#[test]
fn unknown_pairs_fail_construction() {
    let stage = stage();
    let definition = morph_definition().with_character(PairDefinition::new("revenue", "profit"));
    let err = stage
        .catalog
        .transition(&definition, stage.mount)
        .expect_err("unknown character");
    assert!(matches!(
        err,
        ChartError::UnknownCharacter { ref chart, ref name, .. } if chart == "b" && name == "profit"
    ));

    let definition = morph_definition().with_axis(PairDefinition::new("z", "y"));
    let err = stage
        .catalog
        .transition(&definition, stage.mount)
        .expect_err("unknown axis");
    assert!(matches!(err, ChartError::UnknownAxis { ref chart, .. } if chart == "a"));
}

#[test]
fn endpoints_must_match_the_definition() {
    let stage = stage();
    let a = stage.catalog.get("a").expect("a");
    let b = stage.catalog.get("b").expect("b");
    let err = TransitionChart::build(&morph_definition(), b, a, stage.mount)
        .expect_err("swapped endpoints");
    assert!(matches!(
        err,
        ChartError::ChartMismatch { ref expected, ref actual, .. } if expected == "a" && actual == "b"
    ));

    let missing = TransitionDefinition::new("t", TransitionKind::Morph, "a", "zzz");
    assert!(matches!(
        stage.catalog.transition(&missing, stage.mount),
        Err(ChartError::ChartNotFound { ref name }) if name == "zzz"
    ));
}

#[test]
fn transition_design_overrides_merge_onto_from_design() {
    let stage = stage();
    let mut definition = morph_definition();
    definition.design = Some(chart_morph::core::DesignOverride {
        margin: Some(chart_morph::core::MarginOverride {
            left: Some(10.0),
            ..Default::default()
        }),
        ..Default::default()
    });
    let transition = stage
        .catalog
        .transition(&definition, stage.mount)
        .expect("transition");

    assert_eq!(transition.design().margin.left, 10.0);
    assert_eq!(
        transition.design().margin.top,
        stage.catalog.get("a").expect("a").design().margin.top
    );
}

#[test]
fn axes_are_drawn_over_characters() {
    let stage = stage();
    let transition = stage
        .catalog
        .transition(&morph_definition(), stage.mount)
        .expect("transition");

    let frame = transition.frame_at(0.5).expect("frame");
    let roles: Vec<_> = frame.layers.iter().map(|layer| layer.role).collect();
    assert_eq!(
        roles,
        vec![LayerRole::Characters, LayerRole::Scene, LayerRole::Scene]
    );
}
