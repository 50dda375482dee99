use anyhow::{bail, Context, Result};
use log::info;
use region_match::pipeline::{
    load, search_area, Bitmap, IgnoredChannels, ReferencePattern, Region,
};
use std::env;

const USAGE: &str = "Usage: match_tester <screenshot> <left> <top> <width> <height> \
[<other_screenshot> <area_left> <area_top> <area_width> <area_height> <expect>]";

fn parse_u32(args: &[String], index: usize, name: &str) -> Result<u32> {
    args[index]
        .parse()
        .with_context(|| format!("{name} must be a non-negative integer, got {:?}", args[index]))
}

fn parse_region(args: &[String], start: usize) -> Result<Region> {
    Ok(Region::new(
        parse_u32(args, start, "left")?,
        parse_u32(args, start + 1, "top")?,
        parse_u32(args, start + 2, "width")?,
        parse_u32(args, start + 3, "height")?,
    ))
}

fn load_bitmap(path: &str) -> Result<Bitmap> {
    let bitmap = load(path).with_context(|| format!("failed to load {path}"))?;
    info!("loaded {path} ({}x{})", bitmap.width(), bitmap.height());
    Ok(bitmap)
}

fn main() -> Result<()> {
    env_logger::init();

    // --- 1. Argument Parsing & Setup ---
    let args: Vec<String> = env::args().collect();
    if args.len() != 6 && args.len() != 12 {
        println!("{USAGE}");
        return Ok(());
    }

    // --- 2. Pattern Registration ---
    let reference = load_bitmap(&args[1])?;
    let region = parse_region(&args, 2)?;
    let pattern = ReferencePattern::capture(&reference, region)?;

    println!("region     {}x{} at ({}, {})", region.width, region.height, region.left, region.top);
    println!("lightness  {:.4}", pattern.lightness());
    let gray = pattern.grayscale();
    let (min, max) = gray
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    println!("grayscale  {} cells, {:.1}..{:.1}", gray.len(), min, max);

    if args.len() == 6 {
        return Ok(());
    }

    // --- 3. Comparison Against a Newer Capture ---
    let current = load_bitmap(&args[6])?;
    if !region.fits_within(current.width(), current.height()) {
        bail!(
            "region does not fit the second screenshot ({}x{})",
            current.width(),
            current.height()
        );
    }
    println!("texture    {:.2}", pattern.texture_similarity_to(&current));
    println!(
        "absolute   {:.2}",
        pattern.absolute_similarity_to(&current, IgnoredChannels::NONE)
    );

    // --- 4. Area Search ---
    let area = parse_region(&args, 7)?;
    if !area.fits_within(current.width(), current.height()) {
        bail!("search area does not fit the second screenshot");
    }
    let expect: f64 = args[11]
        .parse()
        .with_context(|| format!("expect must be a number, got {:?}", args[11]))?;

    let found = search_area(&pattern, &current, area, expect, IgnoredChannels::NONE);
    println!(
        "search     value {:.2} matched {} at ({}, {}) after {} offsets",
        found.value, found.matched, found.position.left, found.position.top, found.evaluated
    );

    Ok(())
}
