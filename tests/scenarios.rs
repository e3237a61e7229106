use pixel_workbench::{
    apply, blend, classify_shape, count_solid_black_objects, cumulative, denoise, draw_border,
    equalize, histogram, is_rectangle_filled, is_rectangle_open, negative, process_image, threshold,
    BlendMode, BorderStyle, Channel, Color, Operation, PixelBuffer, Recipe, Selection, Shape,
    Topology,
};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn noisy(width: u32, height: u32) -> PixelBuffer {
    // Deterministic pseudo-random bytes (LCG)
    let mut state: u32 = 0x2545_f491;
    let data = (0..width * height * 4)
        .map(|_| {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        })
        .collect();
    PixelBuffer::from_raw(width, height, data).unwrap()
}

#[test]
fn black_square_walkthrough() {
    init_logger();
    let black = PixelBuffer::filled(4, 4, Color::BLACK);

    assert_eq!(threshold(&black, 1), black);
    assert_eq!(negative(&black), PixelBuffer::filled(4, 4, Color::WHITE));

    let red = Color::rgb(255, 0, 0);
    let style = BorderStyle { color: red, width: 1 };
    let marked = draw_border(&black, &Selection::from_corners((0, 0), (3, 3)), &style);
    for y in 0..4 {
        for x in 0..4 {
            let ring = x == 0 || y == 0 || x == 3 || y == 3;
            let expected = if ring { red } else { Color::BLACK };
            assert_eq!(marked.pixel(x, y), Some(expected), "({}, {})", x, y);
        }
    }
}

#[test]
fn negative_twice_restores_noisy_buffer() {
    let buf = noisy(17, 9);
    assert_eq!(negative(&negative(&buf)), buf);
}

#[test]
fn threshold_always_binary() {
    let buf = noisy(12, 12);
    for level in [0u8, 37, 128, 254, 255] {
        let out = threshold(&buf, level);
        for px in out.pixels() {
            assert!(px[0] == 0 || px[0] == 255);
            assert!(px[0] == px[1] && px[1] == px[2]);
        }
    }
}

#[test]
fn cumulative_histogram_properties() {
    let buf = noisy(31, 7);
    let hist = histogram(&buf);
    let cum = cumulative(&hist);
    for channel in Channel::ALL {
        assert_eq!(u64::from(cum[255].get(channel)), hist.total(channel));
        assert_eq!(hist.total(channel), 31 * 7);
        let values: Vec<u32> = cum.channel(channel).collect();
        assert!(values.windows(2).all(|w| w[0] <= w[1]));
    }
}

#[test]
fn denoise_keeps_borders_byte_identical() {
    let buf = noisy(9, 6);
    for topology in [Topology::Cross, Topology::Diagonal, Topology::Full3x3] {
        let out = denoise(&buf, topology);
        for y in 0..6 {
            for x in 0..9 {
                let border = x == 0 || y == 0 || x == 8 || y == 5;
                if border {
                    assert_eq!(out.pixel(x, y), buf.pixel(x, y));
                } else {
                    assert_eq!(out.pixel(x, y).unwrap().a, buf.pixel(x, y).unwrap().a);
                }
            }
        }
    }
}

#[test]
fn blend_identity_over_overlap() {
    let a = noisy(6, 4);
    let b = noisy(3, 8);
    let out = blend(&a, &b, 100, 0, BlendMode::Sum);
    assert_eq!(out.dimensions(), (3, 4));
    for y in 0..4 {
        for x in 0..3 {
            let src = a.pixel(x, y).unwrap();
            assert_eq!(out.pixel(x, y), Some(Color::rgba(src.r, src.g, src.b, 255)));
        }
    }
}

#[test]
fn equalize_leaves_input_untouched() {
    let buf = noisy(10, 10);
    let copy = buf.clone();
    let _ = equalize(&buf, true);
    let _ = equalize(&buf, false);
    assert_eq!(buf, copy);
}

#[test]
fn recipe_pipeline_through_files() {
    init_logger();
    let dir = std::env::temp_dir().join(format!("pixel_workbench_scenarios_{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let input = dir.join("input.png");
    let second = dir.join("second.png");
    let output = dir.join("out").join("result.png");

    pixel_workbench::io::save_image(&PixelBuffer::filled(8, 6, Color::rgb(200, 100, 50)), &input).unwrap();
    pixel_workbench::io::save_image(&PixelBuffer::filled(5, 9, Color::rgb(100, 100, 100)), &second).unwrap();

    let recipe = Recipe::from_json(
        r#"{"operations": [
            {"op": "blend", "pct_a": 50, "pct_b": 50, "mode": "sum"},
            {"op": "greyscale"},
            {"op": "draw_border", "selection": {"start": [4, 5], "end": [0, 0]},
             "style": {"color": {"r": 0, "g": 255, "b": 0}, "width": 1}}
        ]}"#,
    )
    .unwrap();

    let result = process_image(&input, &output, &recipe, Some(second.as_path())).unwrap();
    assert_eq!(result.original_size, (8, 6));
    assert_eq!(result.final_size, (5, 6));
    assert_eq!(result.operations_applied, 3);

    let out = pixel_workbench::io::load_image(&output).unwrap();
    assert_eq!(out.pixel(0, 0), Some(Color::rgb(0, 255, 0)));
    // blend: (150, 100, 75) -> grey mean 108.33
    assert_eq!(out.pixel(2, 2), Some(Color::rgb(108, 108, 108)));

    assert!(process_image(&input, &output, &recipe, None).is_err());
    let _ = std::fs::remove_dir_all(&dir);
}

#[test]
fn dispatch_matches_direct_calls() {
    let buf = noisy(7, 7);
    let op = Operation::Denoise { topology: Topology::Diagonal };
    assert_eq!(apply(&op, &buf, None).unwrap(), denoise(&buf, Topology::Diagonal));
    let op = Operation::Equalize { valid_shades_only: true };
    assert_eq!(apply(&op, &buf, None).unwrap(), equalize(&buf, true));
}

#[test]
fn drawn_outline_reads_back_as_closed_rectangle() {
    init_logger();
    let white = PixelBuffer::filled(8, 6, Color::WHITE);
    let style = BorderStyle { color: Color::BLACK, width: 1 };
    let outline = draw_border(&white, &Selection::from_corners((6, 4), (1, 1)), &style);

    assert_eq!(count_solid_black_objects(&outline), 1);
    assert!(!is_rectangle_filled(&outline));
    assert!(!is_rectangle_open(&outline));
    assert_eq!(classify_shape(&outline), Shape::Square);

    let i = outline.index(1, 3);
    let mut raw = outline.clone().into_raw();
    raw[i..i + 4].copy_from_slice(&[255; 4]);
    let broken = PixelBuffer::from_raw(8, 6, raw).unwrap();
    assert!(is_rectangle_open(&broken));

    let thick = BorderStyle { color: Color::BLACK, width: 2 };
    let filled = draw_border(&white, &Selection::from_corners((1, 1), (4, 4)), &thick);
    assert!(is_rectangle_filled(&filled));
}
