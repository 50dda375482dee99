use region_match::pipeline::*;

/// A light "window" with a dark title bar and a coloured button, drawn at `(x, y)`.
fn screen(x: u32, y: u32, button: [u8; 3]) -> Bitmap {
    Bitmap::from_fn(160, 120, |px, py| {
        let inside = px >= x && px < x + 60 && py >= y && py < y + 40;
        if !inside {
            return [235, 235, 235, 255];
        }
        let (lx, ly) = (px - x, py - y);
        if ly < 8 {
            [40, 40, 60, 255]
        } else if (20..52).contains(&lx) && (18..32).contains(&ly) {
            [button[0], button[1], button[2], 255]
        } else {
            [250, 250, 250, 255]
        }
    })
}

const GREEN: [u8; 3] = [40, 180, 70];
const RED: [u8; 3] = [200, 40, 40];

#[test]
fn registered_region_still_matches_unchanged_screen() {
    let bitmap = screen(20, 30, GREEN);
    let pattern = ReferencePattern::capture(&bitmap, Region::new(20, 30, 60, 40)).unwrap();

    assert_eq!(pattern.texture_similarity_to(&bitmap), 100.0);
    assert_eq!(pattern.absolute_similarity_to(&bitmap, IgnoredChannels::NONE), 100.0);
    assert!(pattern.lightness() > 50.0 && pattern.lightness() <= 100.0);
}

#[test]
fn button_colour_change_is_an_absolute_difference() {
    let before = screen(20, 30, GREEN);
    let after = screen(20, 30, RED);
    let pattern = ReferencePattern::capture(&before, Region::new(20, 30, 60, 40)).unwrap();

    let strict = pattern.absolute_similarity_to(&after, IgnoredChannels::NONE);
    let hue_blind = pattern.absolute_similarity_to(&after, IgnoredChannels::HUE);
    assert!(strict < 100.0);
    assert!(hue_blind >= strict);
}

#[test]
fn moved_window_is_found_inside_search_area() {
    let before = screen(20, 30, GREEN);
    let pattern = ReferencePattern::capture(&before, Region::new(20, 30, 60, 40)).unwrap();

    let after = screen(70, 50, GREEN);
    let found = search_area(&pattern, &after, Region::new(50, 40, 100, 70), 99.99, IgnoredChannels::NONE);

    assert!(found.matched);
    assert_eq!(found.value, 100.0);
    assert_eq!(found.position, Region::new(70, 50, 60, 40));
}

#[test]
fn missing_window_is_reported_with_best_effort_score() {
    let before = screen(20, 30, GREEN);
    let pattern = ReferencePattern::capture(&before, Region::new(20, 30, 60, 40)).unwrap();

    let empty = Bitmap::from_fn(160, 120, |_, _| [235, 235, 235, 255]);
    let area = Region::new(0, 0, 80, 50);
    let result = search_area(&pattern, &empty, area, 90.0, IgnoredChannels::NONE);

    assert!(!result.matched);
    assert!(result.value <= 90.0);
    assert_eq!(result.evaluated, 21 * 11);
}

#[test]
fn single_offset_search_equals_direct_comparison() {
    let before = screen(20, 30, GREEN);
    let after = screen(22, 31, GREEN);
    let region = Region::new(20, 30, 60, 40);
    let pattern = ReferencePattern::capture(&before, region).unwrap();

    let direct = absolute_similarity(
        pattern.hsv(),
        &to_hsv(&sample_cell_grid(&after, &region)),
        IgnoredChannels::SATURATION,
    );
    let searched = search_area(&pattern, &after, region, 100.0, IgnoredChannels::SATURATION);

    assert_eq!(searched.evaluated, 1);
    assert_eq!(searched.value, direct);
}

#[test]
fn fingerprints_have_fixed_shape_for_any_aspect_ratio() {
    let bitmap = screen(0, 0, GREEN);
    for region in [
        Region::new(0, 0, 160, 8),
        Region::new(0, 0, 8, 120),
        Region::new(13, 17, 99, 41),
    ] {
        let rgb = sample_cell_grid(&bitmap, &region);
        assert_eq!(rgb.len(), GRID_WIDTH as usize * GRID_HEIGHT as usize);
        assert_eq!(to_hsv(&rgb).len(), CELL_COUNT);
        assert_eq!(to_grayscale(&rgb).len(), CELL_COUNT);
    }
}

#[test]
fn bitmap_round_trips_through_png() {
    let bitmap = screen(10, 10, RED);
    let path = std::env::temp_dir().join("region_match_integration_screen.png");
    save(&path, &bitmap).unwrap();
    let loaded = load(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    let region = Region::new(10, 10, 60, 40);
    let pattern = ReferencePattern::capture(&bitmap, region).unwrap();
    assert_eq!(pattern.absolute_similarity_to(&loaded, IgnoredChannels::NONE), 100.0);
}

#[cfg(feature = "serde")]
#[test]
fn area_match_serializes_for_relay() {
    let result = AreaMatch {
        value: 87.5,
        matched: true,
        position: Region::new(1, 2, 3, 4),
        evaluated: 9,
    };
    let json = serde_json::to_string(&result).unwrap();
    let back: AreaMatch = serde_json::from_str(&json).unwrap();
    assert_eq!(back, result);

    let mask = IgnoredChannels::HUE | IgnoredChannels::VALUE;
    let back: IgnoredChannels = serde_json::from_str(&serde_json::to_string(&mask).unwrap()).unwrap();
    assert_eq!(back, mask);
}
