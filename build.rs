use image::GenericImageView;
use std::env;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Convert a PNG image to raw big-endian RGB565 at build time.
///
/// The image is resized to fit the panel while preserving aspect ratio and
/// centered on a black background.
fn convert_image_to_rgb565(
    input_path: &str,
    output_path: &str,
    target_width: u32,
    target_height: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed={}", input_path);

    // Check if input file exists
    if !Path::new(input_path).exists() {
        println!(
            "cargo:warning=Image file '{}' not found, skipping conversion",
            input_path
        );
        // Create empty file so build doesn't fail
        let mut file = File::create(output_path)?;
        file.write_all(&[])?;
        return Ok(());
    }

    println!("cargo:warning=Converting image: {}", input_path);

    let img = image::open(input_path)?;
    println!(
        "cargo:warning=Original image size: {}x{}",
        img.width(),
        img.height()
    );

    // Calculate aspect-ratio-preserving dimensions
    let orig_ratio = img.width() as f32 / img.height() as f32;
    let target_ratio = target_width as f32 / target_height as f32;

    let (new_width, new_height) = if orig_ratio > target_ratio {
        // Image is wider than target - fit to width
        (target_width, (target_width as f32 / orig_ratio) as u32)
    } else {
        // Image is taller than target - fit to height
        ((target_height as f32 * orig_ratio) as u32, target_height)
    };

    println!(
        "cargo:warning=Resizing to: {}x{} (preserving aspect ratio)",
        new_width, new_height
    );

    let resized = img
        .resize(new_width, new_height, image::imageops::FilterType::Lanczos3)
        .to_rgb8();

    // Centering offsets
    let offset_x = (target_width - new_width) / 2;
    let offset_y = (target_height - new_height) / 2;

    // Black background, centered image, two big-endian bytes per pixel
    let mut buffer = Vec::with_capacity((target_width * target_height * 2) as usize);
    for y in 0..target_height {
        for x in 0..target_width {
            let img_x = x.checked_sub(offset_x);
            let img_y = y.checked_sub(offset_y);

            let (r, g, b) = match (img_x, img_y) {
                (Some(ix), Some(iy)) if ix < resized.width() && iy < resized.height() => {
                    let pixel = resized.get_pixel(ix, iy);
                    (pixel[0], pixel[1], pixel[2])
                }
                _ => (0, 0, 0),
            };

            let rgb565 =
                (((r & 0xF8) as u16) << 8) | (((g & 0xFC) as u16) << 3) | ((b >> 3) as u16);
            buffer.extend_from_slice(&rgb565.to_be_bytes());
        }
    }

    println!(
        "cargo:warning=Image conversion complete. Buffer size: {} bytes",
        buffer.len()
    );

    let mut file = File::create(output_path)?;
    file.write_all(&buffer)?;

    println!("cargo:warning=RGB565 image saved to: {}", output_path);
    Ok(())
}

fn main() {
    embuild::espidf::sysenv::output();

    let out_dir = env::var("OUT_DIR").unwrap();

    // Convert logo.png to the panel's native format at build time
    let logo_output = format!("{}/logo.bin", out_dir);

    if let Err(e) = convert_image_to_rgb565("logo.png", &logo_output, 160, 80) {
        println!("cargo:warning=Failed to convert logo.png: {}", e);
    }

    println!("cargo:rerun-if-changed=logo.png");
}
