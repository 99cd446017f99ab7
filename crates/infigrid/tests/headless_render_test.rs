//! Headless rendering integration tests.
//!
//! These need a GPU adapter (real or software fallback). Without one,
//! engine creation fails and the test returns early.

use infigrid::*;

const WIDTH: u32 = 160;
const HEIGHT: u32 = 120;

fn is_uniform(pixels: &[u8]) -> bool {
    let first = &pixels[0..4];
    pixels.chunks(4).all(|px| px == first)
}

/// All cases share one function so a missing adapter skips them together.
#[test]
fn headless_render_tests() {
    // --- Default grid draws lines ---
    let options = ViewerOptions::default();
    let pixels = match render_to_image(&options, WIDTH, HEIGHT) {
        Ok(pixels) => pixels,
        Err(e) => {
            eprintln!("Skipping headless tests: no GPU adapter available ({e})");
            return;
        }
    };
    assert_eq!(pixels.len(), (WIDTH * HEIGHT * 4) as usize);
    assert!(!is_uniform(&pixels), "default grid should draw visible lines");

    // --- Opacity 0 leaves only the background ---
    {
        let mut options = ViewerOptions::default();
        options.grid.set_opacity(0.0);
        let pixels = render_to_image(&options, WIDTH, HEIGHT).expect("render failed");
        assert!(is_uniform(&pixels), "fully transparent grid should not be visible");
    }

    // --- Every plane renders with a matching up axis ---
    for (plane, up) in [
        (GridPlane::Xz, WorldAxis::Y),
        (GridPlane::Xy, WorldAxis::Z),
        (GridPlane::Zy, WorldAxis::X),
    ] {
        let mut options = ViewerOptions::default();
        options.grid.set_plane(plane);
        options.up_axis = up;
        options.indicator_axes = vec![plane.normal_axis()];
        let pixels = render_to_image(&options, WIDTH, HEIGHT).expect("render failed");
        assert!(!is_uniform(&pixels), "{plane:?} grid should draw visible lines");
    }

    // --- Image export ---
    {
        let path = std::env::temp_dir().join(format!("infigrid-headless-{}.png", std::process::id()));
        render_to_file(&ViewerOptions::default(), &path, WIDTH, HEIGHT).expect("export failed");
        assert!(path.exists());
        let _ = std::fs::remove_file(&path);
    }
}

#[test]
fn unsupported_plane_fails_before_rendering() {
    let err = GridDrawable::from_plane_index(3).err();
    assert!(matches!(err, Some(GridError::UnsupportedPlane(3))));
}
