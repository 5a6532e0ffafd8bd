#![allow(clippy::missing_docs_in_private_items)]
#![allow(clippy::arithmetic_side_effects)]
#![allow(clippy::indexing_slicing)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::print_stdout)]

use chained_hashmap::{ChainStats, StringHashMap};
use plotters::prelude::*;
use rand::Rng;

const RANDOM_KEYS: usize = 5_000;
const KEY_SPACE: u32 = 10_000_000;

fn print_state(label: &str, map: &StringHashMap<&str>) {
    println!("{label}: {}/{} (load factor {:.4})", map.len(), map.capacity(), map.load_factor());
}

fn print_buckets(map: &StringHashMap<&str>) {
    for index in 0..map.capacity() {
        if let Some(chain) = map.bucket(index).filter(|chain| !chain.is_empty()) {
            println!("  bucket {index:>2}: {chain:?}");
        }
    }
}

fn replay_trace() {
    let mut map = StringHashMap::new();
    print_state("empty", &map);

    for (key, value) in [
        ("apple", "red"),
        ("banana", "yellow"),
        ("carrot", "orange"),
        ("dog", "brown"),
        ("elephant", "gray"),
        ("frog", "green"),
        ("grape", "purple"),
        ("hat", "black"),
        ("ice cream", "white"),
        ("jacket", "blue"),
        ("kite", "pink"),
        ("lion", "golden"),
    ] {
        map.set(key, value);
    }
    print_state("populated", &map);
    print_buckets(&map);

    map.set("apple", "green");
    map.set("banana", "brown");
    map.set("lion", "white");
    print_state("after overwrites", &map);

    map.set("moon", "silver");
    print_state("after inserting moon", &map);
    print_buckets(&map);

    map.set("moon", "gold");
    map.set("apple", "crimson");
    map.set("dog", "black");
    print_state("after overwrites past resize", &map);

    println!("get(\"apple\"): {:?}", map.get("apple"));
    println!("get(\"moon\"): {:?}", map.get("moon"));
    println!("get(\"missing\"): {:?}", map.get("missing"));
    println!("has(\"banana\"): {}", map.has("banana"));
    println!("has(\"missing\"): {}", map.has("missing"));

    println!("size before remove: {}", map.len());
    println!("remove(\"frog\"): {}", map.remove("frog"));
    println!("remove(\"frog\"): {}", map.remove("frog"));
    println!("size after remove: {}", map.len());
    println!("length(): {}", map.len());

    println!("keys(): {:?}", map.keys());
    println!("values(): {:?}", map.values());
    println!("entries(): {:?}", map.entries());

    map.clear();
    println!("size after clear(): {}", map.len());
    println!("buckets length after clear(): {}", map.chain_lengths().len());
    println!("capacity after clear(): {}", map.capacity());
}

/// Load factor and capacity observed after each insertion
struct GrowthSample {
    inserted: usize,
    load_factor: f64,
    capacity: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    replay_trace();

    let mut rng = rand::rng();
    let mut map = StringHashMap::new();
    let mut samples = Vec::with_capacity(RANDOM_KEYS);

    while map.len() < RANDOM_KEYS {
        map.set(format!("key-{}", rng.random_range(0..KEY_SPACE)), ());
        samples.push(GrowthSample {
            inserted: map.len(),
            load_factor: map.load_factor(),
            capacity: map.capacity(),
        });
    }

    let stats = ChainStats::of(&map);
    println!(
        "{} random keys: {} buckets, {} empty, longest chain {}, mean chain {:.2}",
        map.len(),
        stats.buckets,
        stats.empty_buckets,
        stats.longest_chain,
        stats.mean_chain_length
    );

    let font_family = "sans-serif";
    let text_size = 16;
    let title_size = 35;
    let line_width = 2;

    // Plot 1: load factor and capacity as keys accumulate
    let root = BitMapBackend::new("load_factor_growth.png", (1200, 900)).into_drawing_area();
    root.fill(&WHITE)?;
    let areas = root.split_evenly((2, 1));

    let mut load_chart = ChartBuilder::on(&areas[0])
        .caption("Load Factor While Inserting", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..RANDOM_KEYS, 0.0..1.0)?;

    load_chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Load Factor")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    let threshold = map.load_factor_threshold();
    let threshold_style = ShapeStyle::from(&RED.mix(0.3)).stroke_width(1);
    load_chart
        .draw_series(LineSeries::new(
            vec![(0, threshold), (RANDOM_KEYS, threshold)],
            threshold_style,
        ))?
        .label("Resize Threshold")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], threshold_style));

    let load_style = ShapeStyle::from(&RGBColor(50, 90, 220)).stroke_width(line_width);
    load_chart
        .draw_series(LineSeries::new(
            samples.iter().map(|s| (s.inserted, s.load_factor)),
            load_style,
        ))?
        .label("Load Factor")
        .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], load_style));

    load_chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .position(SeriesLabelPosition::LowerRight)
        .draw()?;

    let max_capacity = samples.iter().map(|s| s.capacity).max().unwrap_or(1);
    let mut capacity_chart = ChartBuilder::on(&areas[1])
        .caption("Bucket Count While Inserting", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..RANDOM_KEYS, 0..max_capacity + max_capacity / 10)?;

    capacity_chart
        .configure_mesh()
        .x_desc("Number of Keys Inserted")
        .y_desc("Buckets")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    capacity_chart.draw_series(LineSeries::new(
        samples.iter().map(|s| (s.inserted, s.capacity)),
        ShapeStyle::from(&RGBColor(50, 180, 50)).stroke_width(line_width),
    ))?;

    // Plot 2: how many buckets hold chains of each length
    let histogram = ChainStats::histogram(&map);
    let max_count = histogram.iter().copied().max().unwrap_or(1);

    let root =
        BitMapBackend::new("chain_length_distribution.png", (1200, 800)).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chain_chart = ChartBuilder::on(&root)
        .caption("Chain Length Distribution", (font_family, title_size))
        .margin(15)
        .x_label_area_size(60)
        .y_label_area_size(60)
        .build_cartesian_2d(0..histogram.len(), 0..max_count + max_count / 10)?;

    chain_chart
        .configure_mesh()
        .x_desc("Chain Length")
        .y_desc("Buckets")
        .axis_desc_style((font_family, text_size))
        .draw()?;

    let bar_color = RGBColor(220, 50, 50);
    chain_chart.draw_series(
        histogram
            .iter()
            .enumerate()
            .map(|(len, &count)| Rectangle::new([(len, 0), (len + 1, count)], bar_color.filled())),
    )?;

    println!("Generated plot images: load_factor_growth.png, chain_length_distribution.png");

    Ok(())
}
