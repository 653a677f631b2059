use camino::Utf8Path;
use qrpath::{EcLevel, QrCode, RenderConfig};
use qrpath_compare::{RoundTrip, extract_path_data, round_trip};
use rayon::prelude::*;
use std::fs;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("Usage: cargo xtask <command>");
        eprintln!("Commands:");
        eprintln!("  gallery    Render sample codes, verify them and write gallery.html");
        std::process::exit(1);
    }

    match args[1].as_str() {
        "gallery" => gallery(),
        _ => {
            eprintln!("Unknown command: {}", args[1]);
            std::process::exit(1);
        }
    }
}

/// A gallery entry: label plus the config to render.
fn samples() -> Vec<(&'static str, RenderConfig)> {
    let logo = "data:image/svg+xml;utf8,%3Csvg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 10 10'%3E%3Ccircle cx='5' cy='5' r='5' fill='%23e8590c'/%3E%3C/svg%3E";
    vec![
        ("default", RenderConfig::default()),
        ("url, level L", RenderConfig::new("https://example.com").size(200.0).ecl(EcLevel::L)),
        ("url, level H", RenderConfig::new("https://example.com").size(200.0).ecl(EcLevel::H)),
        (
            "colored, padded",
            RenderConfig::new("colors")
                .size(200.0)
                .padding(24.0)
                .color("#1d4ed8")
                .background_color("#eff6ff"),
        ),
        (
            "logo",
            RenderConfig::new("https://example.com/with/a/logo")
                .size(200.0)
                .padding(16.0)
                .ecl(EcLevel::H)
                .logo(logo),
        ),
        (
            "rounded logo",
            RenderConfig::new("https://example.com/with/a/logo")
                .size(200.0)
                .padding(16.0)
                .ecl(EcLevel::H)
                .logo(logo)
                .logo_size(48.0)
                .logo_margin(4.0)
                .logo_border_radius(8.0)
                .logo_background_color("#fff7ed"),
        ),
        (
            "transparent background",
            RenderConfig::new("transparent").size(200.0).background_color("transparent"),
        ),
        ("long text", RenderConfig::new("lorem ipsum ".repeat(40)).size(300.0)),
    ]
}

struct Rendered {
    label: &'static str,
    svg: String,
    status: Result<String, String>,
}

fn render_sample(label: &'static str, config: RenderConfig) -> Rendered {
    let code = match QrCode::new(config) {
        Ok(code) => code,
        Err(e) => {
            return Rendered {
                label,
                svg: String::new(),
                status: Err(format!("generation failed: {e}")),
            };
        }
    };

    let svg = code.to_svg();
    let status = match (code.matrix(), code.cell_size(), extract_path_data(&svg)) {
        (Some(matrix), Some(cell), Some(d)) => {
            let rows: Vec<Vec<bool>> = matrix.rows().map(<[bool]>::to_vec).collect();
            match round_trip(d, &rows, cell.raw()) {
                Ok(RoundTrip::Exact) => Ok(format!(
                    "{n}x{n}, {} commands",
                    code.path().map_or(0, |p| p.len()),
                    n = matrix.width()
                )),
                Ok(RoundTrip::Mismatch {
                    diff,
                    overpainted,
                    outside,
                }) => Err(format!(
                    "{}{} overpainted, {} outside the grid",
                    diff.format_report(),
                    overpainted.len(),
                    outside.len()
                )),
                Err(e) => Err(e.to_string()),
            }
        }
        _ => Err("no path in output".to_string()),
    };

    Rendered { label, svg, status }
}

fn gallery() {
    let manifest_dir = Utf8Path::new(env!("CARGO_MANIFEST_DIR"));
    let output_path = manifest_dir.join("../gallery.html");

    // Rendering is independent per sample
    let results: Vec<Rendered> = samples()
        .into_par_iter()
        .enumerate()
        .map(|(i, (label, config))| {
            eprintln!("Rendering {label}...");
            // All cards share one document, so clip ids must not collide
            render_sample(label, config.clip_id_prefix(format!("sample{i}-")))
        })
        .collect();

    let total = results.len();
    let passed = results.iter().filter(|r| r.status.is_ok()).count();

    let mut html = String::new();
    html.push_str(
        r#"<!DOCTYPE html>
<html>
<head>
    <meta charset="UTF-8">
    <title>qrpath gallery</title>
    <style>
        body { font-family: system-ui, sans-serif; background: #eee; color: #333; margin: 0; }
        .page { max-width: 1200px; margin: 0 auto; padding: 24px; }
        h1 { font-weight: 600; font-size: 20px; margin: 0 0 24px 0; }
        .grid { display: grid; grid-template-columns: repeat(auto-fill, minmax(260px, 1fr)); gap: 16px; }
        .card { background: white; border-radius: 8px; box-shadow: 0 1px 3px rgba(0,0,0,0.08); overflow: hidden; }
        .card-header { display: flex; justify-content: space-between; padding: 10px 12px; background: #fafafa; border-bottom: 1px solid #eee; font-size: 13px; font-weight: 600; }
        .status { font-size: 11px; padding: 2px 8px; border-radius: 4px; }
        .status.ok { background: #dcfce7; color: #166534; }
        .status.fail { background: #fee2e2; color: #991b1b; }
        .svg-container { padding: 12px; display: flex; justify-content: center; background: repeating-conic-gradient(#f4f4f4 0 25%, #fff 0 50%) 0 0 / 16px 16px; }
        .svg-container svg { max-width: 100%; height: auto; }
        .detail { padding: 8px 12px; font-size: 12px; color: #666; white-space: pre-wrap; }
    </style>
</head>
<body>
<div class="page">
"#,
    );
    html.push_str(&format!("<h1>qrpath gallery: {passed}/{total} verified</h1>\n<div class=\"grid\">\n"));

    for r in &results {
        let (class, badge, detail) = match &r.status {
            Ok(detail) => ("ok", "verified", detail.as_str()),
            Err(detail) => ("fail", "mismatch", detail.as_str()),
        };
        html.push_str(&format!(
            r#"<div class="card">
    <div class="card-header"><span>{label}</span><span class="status {class}">{badge}</span></div>
    <div class="svg-container">{svg}</div>
    <div class="detail">{detail}</div>
</div>
"#,
            label = html_escape(r.label),
            svg = r.svg,
            detail = html_escape(detail),
        ));
    }

    html.push_str("</div>\n</div>\n</body>\n</html>\n");

    if let Err(e) = fs::write(&output_path, html) {
        eprintln!("Failed to write {output_path}: {e}");
        std::process::exit(1);
    }
    eprintln!("Wrote {output_path} ({passed}/{total} verified)");

    if passed != total {
        std::process::exit(1);
    }
}

fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
