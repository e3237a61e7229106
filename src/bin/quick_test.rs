use anyhow::{bail, Context};
use pixel_workbench::{
    classify_shape, count_solid_black_objects, histogram, io, is_rectangle_open, process_image,
    Channel, Recipe,
};
use std::path::PathBuf;

/// Usage: quick_test <input> <output> <recipe.json> [second-image]
fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.len() < 3 {
        bail!("usage: quick_test <input> <output> <recipe.json> [second-image]");
    }

    let input = PathBuf::from(&args[0]);
    let output = PathBuf::from(&args[1]);
    let recipe_path = PathBuf::from(&args[2]);
    let second = args.get(3).map(PathBuf::from);

    let recipe = Recipe::load(&recipe_path)
        .with_context(|| format!("Failed to read recipe {}", recipe_path.display()))?;

    println!("Applying {} operation(s) to {}", recipe.operations.len(), input.display());
    if recipe.is_expensive() {
        println!("Note: noise removal can be slow on large images");
    }

    let result = process_image(&input, &output, &recipe, second.as_deref())?;

    println!("\n=== Results ===");
    println!("Original size: {:?}", result.original_size);
    println!("Final size: {:?}", result.final_size);
    println!("Operations applied: {}", result.operations_applied);

    let out = io::load_image(&output)?;
    let hist = histogram(&out);
    for channel in Channel::RGB {
        println!(
            "{:?}: {} shades, darkest level {:?}",
            channel,
            hist.valid_shades(channel),
            hist.min_level(channel)
        );
    }

    println!(
        "Solid black objects: {} (shape: {:?}, open outline: {})",
        count_solid_black_objects(&out),
        classify_shape(&out),
        is_rectangle_open(&out)
    );

    println!("\nOutput saved to: {}", output.display());
    Ok(())
}
