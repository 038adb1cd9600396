use approx::assert_relative_eq;
use chart_morph::core::{BoundingBox, Coordinates, FieldValue, Record};
use chart_morph::model::{
    Anchor, AnnotationDefinition, AxisDefinition, CastAxes, CastDefinition, CharacterDefinition,
    ChartDefinition, LayoutKind,
};
use chart_morph::render::{Color, Drawable, MountPoint, RecordingSurface, RenderSurface};
use chart_morph::ChartModel;

fn record(series: &str, x: f64, value: f64) -> Record {
    let mut record = Record::new();
    record.insert("series".to_owned(), FieldValue::from(series));
    record.insert("step".to_owned(), FieldValue::Number(x));
    record.insert("value".to_owned(), FieldValue::Number(value));
    record
}

fn definition() -> ChartDefinition {
    let mut north = CharacterDefinition::new("north", Color::from_hex("#1f77b4").expect("color"));
    north.annotations.push(AnnotationDefinition {
        name: "peak".to_owned(),
        offset: Coordinates::new(2.0, -4.0),
        anchor: Anchor::End,
    });

    ChartDefinition {
        name: Some("regions".to_owned()),
        data: vec![
            record("north", 0.0, 4.0),
            record("north", 1.0, 8.0),
            record("south", 0.0, 2.0),
            record("south", 1.0, 3.0),
        ],
        axes: vec![
            AxisDefinition::new("x", "step"),
            AxisDefinition::new("y", "value"),
        ],
        cast: CastDefinition {
            field: "series".to_owned(),
            axes: CastAxes::default(),
            characters: vec![
                north,
                CharacterDefinition {
                    name: "south".to_owned(),
                    color: None,
                    annotations: Vec::new(),
                },
            ],
        },
        annotations: vec![AnnotationDefinition {
            name: "one two three four five six seven eight nine ten eleven twelve".to_owned(),
            offset: Coordinates::default(),
            anchor: Anchor::Start,
        }],
        design: None,
        layout: LayoutKind::Area,
    }
}

fn setup() -> (RecordingSurface, ChartModel) {
    let mut surface = RecordingSurface::new();
    let node = surface.add_mount(BoundingBox::new(40.0, 60.0, 1080.0, 720.0));
    let mount = MountPoint::measure(&surface, node).expect("mount");
    let chart = ChartModel::build(&definition(), mount).expect("chart");
    (surface, chart)
}

#[test]
fn chart_coordinates_come_from_the_mount() {
    let (_, chart) = setup();
    assert_eq!(chart.coordinates(), Coordinates::new(40.0, 60.0));
    assert_eq!(chart.inner_width(), 920.0);
    assert_eq!(chart.inner_height(), 500.0);
}

#[test]
fn character_without_color_uses_line_color() {
    let (_, chart) = setup();
    assert_eq!(
        chart.character("south").expect("south").color(),
        chart.design().line.color
    );
}

#[test]
fn draw_is_idempotent() {
    let (mut surface, chart) = setup();
    let mount = chart.mount().node;

    chart.draw(&mut surface).expect("first draw");
    let once = surface.descendant_count(mount);
    let paths_once = surface.paths(mount);

    chart.draw(&mut surface).expect("second draw");
    assert_eq!(surface.descendant_count(mount), once);
    assert_eq!(surface.paths(mount).len(), paths_once.len());
    assert!(once > 0);
}

#[test]
fn title_wraps_every_ten_words() {
    let (mut surface, chart) = setup();
    chart.draw(&mut surface).expect("draw");

    let texts = surface.texts(chart.mount().node);
    let first = texts
        .iter()
        .find(|text| text.text.text.starts_with("one"))
        .expect("first title line");
    let second = texts
        .iter()
        .find(|text| text.text.text.starts_with("eleven"))
        .expect("second title line");

    let design = chart.design();
    assert_relative_eq!(first.text.x, design.margin.left, epsilon = 1e-9);
    assert_relative_eq!(first.text.y, design.margin.top / 3.0, epsilon = 1e-9);
    assert_relative_eq!(second.text.y - first.text.y, 2.0 * design.font.size, epsilon = 1e-9);
    assert_relative_eq!(first.text.font_size_px, design.font.size * 1.4, epsilon = 1e-9);
}

#[test]
fn characters_are_filled_in_their_color_inside_the_margins() {
    let (mut surface, chart) = setup();
    chart.draw_characters(&mut surface).expect("draw characters");

    let north = chart.character("north").expect("north");
    let rendered = surface.paths(chart.mount().node);
    let path = rendered
        .iter()
        .find(|entry| entry.style.fill == Some(north.color()))
        .expect("north outline");

    assert_eq!(&path.path, north.path());
    assert_eq!(
        path.offset,
        Coordinates::new(40.0 + chart.design().margin.left, 60.0 + chart.design().margin.top)
    );
}

#[test]
fn character_annotation_sits_at_its_anchor() {
    let (mut surface, chart) = setup();
    chart.draw(&mut surface).expect("draw");

    let x_axis = chart.x_axis().expect("x");
    let y_axis = chart.y_axis().expect("y");
    let label = surface
        .texts(chart.mount().node)
        .into_iter()
        .find(|text| text.text.text == "peak")
        .expect("peak label");

    let expected_x = x_axis.scale().map_number(1.0).expect("x") + 5.0 + 2.0;
    let expected_y = y_axis.scale().map_number(8.0).expect("y") + 10.0 - 4.0;
    assert!((label.text.x - expected_x).abs() <= 1e-9);
    assert!((label.text.y - expected_y).abs() <= 1e-9);
}

#[test]
fn hide_characters_keeps_the_scene() {
    let (mut surface, chart) = setup();
    chart.draw(&mut surface).expect("draw");
    let texts_before = surface.texts(chart.mount().node).len();

    chart.hide_characters(&mut surface).expect("hide characters");
    let rendered = surface.paths(chart.mount().node);
    assert!(rendered.iter().all(|entry| entry.style.fill.is_none()));
    assert!(surface.texts(chart.mount().node).len() < texts_before);

    chart.draw_characters(&mut surface).expect("redraw characters");
    assert_eq!(surface.texts(chart.mount().node).len(), texts_before);
}

#[test]
fn hide_then_draw_restores_everything() {
    let (mut surface, chart) = setup();
    let mount = chart.mount().node;
    chart.draw(&mut surface).expect("draw");
    let drawn = surface.descendant_count(mount);

    chart.hide(&mut surface).expect("hide");
    assert_eq!(surface.descendant_count(mount), 0);

    chart.draw(&mut surface).expect("redraw");
    assert_eq!(surface.descendant_count(mount), drawn);
}

#[test]
fn scene_bounding_box_covers_the_plot() {
    let (mut surface, chart) = setup();
    chart.draw_scene(&mut surface).expect("scene");
    let group = surface.children(chart.mount().node)[0];
    let bounds = surface.measure_bounding_box(group).expect("bounds");
    assert!(bounds.width >= chart.inner_width());
    assert!(bounds.height >= chart.inner_height());
}
