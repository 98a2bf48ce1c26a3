use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// IEC 61966-2-1 exact formula: sRGB to linear
fn srgb_to_linear_exact(srgb: f64) -> f64 {
    if srgb <= 0.04045 {
        srgb / 12.92
    } else {
        ((srgb + 0.055) / 1.055).powf(2.4)
    }
}

/// IEC 61966-2-1 exact formula: linear to sRGB
fn linear_to_srgb_exact(linear: f64) -> f64 {
    if linear <= 0.0031308 {
        linear * 12.92
    } else {
        1.055 * linear.powf(1.0 / 2.4) - 0.055
    }
}

fn write_table(
    file: &mut File,
    name: &str,
    doc: &str,
    len: usize,
    value: impl Fn(usize) -> f64,
) -> std::io::Result<()> {
    writeln!(file, "/// {doc}")?;
    writeln!(file, "pub static {name}: [f32; {len}] = [")?;
    for i in 0..len {
        if i > 0 && i % 8 == 0 {
            writeln!(file)?;
        }
        write!(file, "    {:.9},", value(i) as f32)?;
    }
    writeln!(file, "\n];\n")?;
    Ok(())
}

fn main() -> std::io::Result<()> {
    let out_dir = env::var("OUT_DIR").expect("OUT_DIR is set by cargo");
    let dest_path = Path::new(&out_dir).join("gamma_lut.rs");
    let mut file = File::create(&dest_path)?;

    // Exact decode for every 8-bit sRGB code value
    write_table(
        &mut file,
        "SRGB8_TO_LINEAR",
        "Linear value for each 8-bit sRGB code",
        256,
        |i| srgb_to_linear_exact(i as f64 / 255.0),
    )?;
    write_table(
        &mut file,
        "LINEAR_TO_SRGB",
        "Index: linear value * 4095.0, Value: sRGB value",
        4096,
        |i| linear_to_srgb_exact(i as f64 / 4095.0),
    )?;

    println!("cargo::rerun-if-changed=build.rs");
    Ok(())
}
