//! End-to-end rendering tests through the public API.

use std::sync::{Arc, Mutex};

use qrpath::{
    EcLevel, GenerationError, GenerationState, Length, Matrix, QrCode, RenderConfig, compile_path,
    render_svg,
};
use qrpath_compare::{RoundTrip, extract_path_data, extract_stroke_width, round_trip};

fn three_by_three(_: &str, _: EcLevel) -> Result<Matrix, GenerationError> {
    Matrix::from_rows([[true, false, true], [false, true, false], [true, true, true]])
}

fn matrix_rows(matrix: &Matrix) -> Vec<Vec<bool>> {
    matrix.rows().map(<[bool]>::to_vec).collect()
}

#[test]
fn three_by_three_matrix_compiles_to_four_segments() {
    let matrix = three_by_three("", EcLevel::M).unwrap();
    let path = compile_path(&matrix, Length(10.0));

    assert_eq!(path.segments().count(), 4);
    insta::assert_snapshot!(path, @"M0 5 L10 5 M20 5 L30 5 M10 15 L20 15 M0 25 L30 25");
}

#[test]
fn padded_logo_layout() {
    let config = RenderConfig::new("layout")
        .size(100.0)
        .padding(10.0)
        .logo_size(20.0)
        .logo_margin(2.0)
        .logo("logo.png");
    let code = QrCode::new(config).unwrap();
    let layout = code.layout();

    assert_eq!(layout.canvas_size, Length(110.0));
    assert_eq!(layout.logo_wrapper.size, Length(24.0));
    assert_eq!(layout.logo_position(), glam::dvec2(43.0, 43.0));

    let svg = code.to_svg();
    assert!(svg.contains(r#"width="110" height="110" viewBox="0 0 110 110""#));
    assert!(svg.contains(r#"<g transform="translate(43 43)">"#));
}

#[test]
fn over_capacity_value_fails_without_handler() {
    let config = RenderConfig::new("x".repeat(3000)).ecl(EcLevel::H);
    let err = render_svg(&config).unwrap_err();
    assert_eq!(err, GenerationError::DataTooLong { ecl: EcLevel::H });
}

#[test]
fn over_capacity_value_with_handler_renders_without_code() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let sink = seen.clone();
    let config = RenderConfig::new("x".repeat(3000))
        .ecl(EcLevel::H)
        .logo("logo.png")
        .on_error(move |e| {
            if let Ok(mut errors) = sink.lock() {
                errors.push(e.clone());
            }
        });

    let code = QrCode::new(config).unwrap();
    assert_eq!(code.state(), &GenerationState::Empty);

    let svg = code.to_svg();
    assert!(!svg.contains("<path"));
    assert!(svg.contains("<image"));
    assert_eq!(
        seen.lock().unwrap().as_slice(),
        &[GenerationError::DataTooLong { ecl: EcLevel::H }]
    );
}

#[test]
fn cosmetic_update_keeps_compiled_path() {
    let mut code = QrCode::new(RenderConfig::new("memo").size(200.0)).unwrap();
    let before = code.path().cloned();

    assert_eq!(
        code.update(RenderConfig::new("memo").size(200.0).color("#336699")),
        Ok(false)
    );
    assert_eq!(code.path().cloned(), before);
    assert!(code.to_svg().contains(r#"stroke="rgb(51,102,153)""#));

    assert_eq!(code.update(RenderConfig::new("memo!").size(200.0)), Ok(true));
    assert_ne!(code.path().cloned(), before);
}

#[test]
fn real_code_paints_back_to_its_matrix() {
    for (value, ecl) in [
        ("https://example.com", EcLevel::M),
        ("HELLO WORLD", EcLevel::Q),
        ("0123456789012345678901234567890123456789", EcLevel::L),
        ("a longer value that needs a bigger version of the symbol", EcLevel::H),
    ] {
        let code = QrCode::new(RenderConfig::new(value).size(250.0).ecl(ecl)).unwrap();
        let matrix = code.matrix().unwrap();
        let svg = code.to_svg();

        let d = extract_path_data(&svg).unwrap();
        let stroke_width = extract_stroke_width(&svg).unwrap();
        let cell = 250.0 / matrix.width() as f64;
        assert!(
            (stroke_width - cell).abs() < 1e-6,
            "{value}: stroke {stroke_width} vs cell {cell}"
        );

        let result = round_trip(d, &matrix_rows(matrix), cell).unwrap();
        assert!(matches!(result, RoundTrip::Exact), "{value} at {ecl}: {result:?}");
    }
}

#[test]
fn full_document_with_logo() {
    let config = RenderConfig::new("fixed")
        .size(30.0)
        .padding(10.0)
        .logo_size(10.0)
        .logo("logo.png");
    let code = QrCode::with_generator(config, three_by_three).unwrap();

    insta::assert_snapshot!(code.to_svg(), @r#"<svg xmlns="http://www.w3.org/2000/svg" width="40" height="40" viewBox="0 0 40 40"><defs><clipPath id="clip-wrapper"><rect width="14" height="14"/></clipPath><clipPath id="clip-logo"><rect width="10" height="10"/></clipPath></defs><rect width="40" height="40" fill="white"/><path transform="translate(5 5)" d="M0 5 L10 5 M20 5 L30 5 M10 15 L20 15 M0 25 L30 25" stroke="black" stroke-width="10"/><g transform="translate(13 13)"><rect width="14" height="14" fill="white" clip-path="url(#clip-wrapper)"/><g transform="translate(2 2)"><image width="10" height="10" preserveAspectRatio="xMidYMid slice" href="logo.png" clip-path="url(#clip-logo)"/></g></g></svg>"#);
}

#[test]
fn logo_geometry_never_feeds_back_into_path() {
    let plain = QrCode::with_generator(RenderConfig::new("a").size(30.0), three_by_three).unwrap();
    let with_logo = QrCode::with_generator(
        RenderConfig::new("a").size(30.0).logo("logo.png").logo_size(25.0),
        three_by_three,
    )
    .unwrap();

    assert_eq!(plain.path(), with_logo.path());
}

#[test]
fn codes_sharing_a_page_get_distinct_clip_ids() {
    let base = RenderConfig::new("page").size(100.0).logo("logo.png");
    let first = render_svg(&base.clone().clip_id_prefix("first-")).unwrap();
    let rounded = base.logo_size(40.0).logo_border_radius(6.0);
    let second = render_svg(&rounded.clip_id_prefix("second-")).unwrap();

    assert!(first.contains(r#"<clipPath id="first-clip-wrapper">"#));
    assert!(second.contains(r#"<clipPath id="second-clip-wrapper">"#));
    assert!(second.contains(r#"clip-path="url(#second-clip-logo)""#));
    assert!(!second.contains("first-"));
}
