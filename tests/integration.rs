#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use image::{GenericImageView, ImageFormat, RgbImage};
    use optipix::{Config, ImageProcessor, OptiError, ResizeMode};
    use std::fs;
    use std::path::Path;
    use std::process::{Command, Output};

    fn write_test_image(path: &Path, width: u32, height: u32) {
        let img = RgbImage::from_fn(width, height, |x, y| {
            image::Rgb([(x % 256) as u8, (y % 256) as u8, ((x + y) % 256) as u8])
        });
        img.save(path).unwrap();
    }

    fn run(args: &[&str]) -> Output {
        Command::new(env!("CARGO_BIN_EXE_optipix"))
            .args(args)
            .output()
            .unwrap()
    }

    #[test]
    fn test_max_longest_resize() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.child("photo.jpg");
        write_test_image(input_path.path(), 400, 300);

        let config = Config {
            input: input_path.path().to_path_buf(),
            max_longest: Some(100),
            ..Default::default()
        };

        let outcome = ImageProcessor::new(config).process().unwrap();

        assert_eq!(outcome.target.mode, ResizeMode::Fit);
        let output_path = temp_dir.child("photo_opt.jpg");
        assert_eq!(outcome.output_path, output_path.path());

        let written = image::open(output_path.path()).unwrap();
        assert_eq!(written.dimensions(), (100, 75));
        assert_eq!(outcome.report.output_size, fs::metadata(output_path.path()).unwrap().len());
    }

    #[test]
    fn test_matching_size_is_no_resize_transcode() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.child("photo.png");
        write_test_image(input_path.path(), 64, 48);
        let output_path = temp_dir.child("photo.webp");

        let config = Config {
            input: input_path.path().to_path_buf(),
            output: Some(output_path.path().to_path_buf()),
            width: Some(64),
            height: Some(48),
            ..Default::default()
        };

        let outcome = ImageProcessor::new(config).process().unwrap();

        assert_eq!(outcome.target.mode, ResizeMode::NoResize);
        let data = fs::read(output_path.path()).unwrap();
        assert_eq!(image::guess_format(&data).unwrap(), ImageFormat::WebP);
        assert_eq!(image::load_from_memory(&data).unwrap().dimensions(), (64, 48));
    }

    #[test]
    fn test_invalid_file() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.child("broken.jpg");
        input_path.write_str("this is not an image").unwrap();

        let config = Config {
            input: input_path.path().to_path_buf(),
            ..Default::default()
        };

        let result = ImageProcessor::new(config).process();

        assert!(matches!(result, Err(OptiError::Decode(_))));
        assert!(!temp_dir.child("broken_opt.jpg").path().exists());
    }

    #[test]
    fn test_cli_prints_summary() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.child("photo.jpg");
        write_test_image(input_path.path(), 400, 300);

        let output = run(&["-i", input_path.path().to_str().unwrap(), "-max", "100"]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("Resizing to longest dimension of 100 px"));
        assert!(stdout.contains("400 x 300 px"));
        assert!(stdout.contains("100 x 75 px"));
        assert!(stdout.contains("Size Reduction"));
        assert!(temp_dir.child("photo_opt.jpg").path().exists());
    }

    #[test]
    fn test_cli_refuses_existing_output() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.child("photo.jpg");
        write_test_image(input_path.path(), 40, 30);
        let existing = temp_dir.child("photo_opt.jpg");
        existing.write_str("keep").unwrap();

        let output = run(&["-i", input_path.path().to_str().unwrap(), "-pct", "50"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("exists"));
        existing.assert("keep");
    }

    #[test]
    fn test_cli_force_replaces_existing_output() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.child("photo.jpg");
        write_test_image(input_path.path(), 40, 30);
        let existing = temp_dir.child("photo_opt.jpg");
        existing.write_str("old").unwrap();

        let output = run(&["-i", input_path.path().to_str().unwrap(), "-pct", "50", "-f"]);

        assert!(output.status.success());
        assert!(String::from_utf8_lossy(&output.stdout).contains("replacing due to -f"));
        assert_eq!(image::open(existing.path()).unwrap().dimensions(), (20, 15));
    }

    #[test]
    fn test_cli_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input_path = temp_dir.child("photo.png");
        write_test_image(input_path.path(), 40, 30);

        let output = run(&["-i", input_path.path().to_str().unwrap(), "-w", "20", "-n"]);

        assert!(output.status.success());
        let stdout = String::from_utf8_lossy(&output.stdout);
        assert!(stdout.contains("**Displaying results only**"));
        assert!(stdout.contains("20 x 30 px"));
        assert!(!temp_dir.child("photo_opt.png").path().exists());
    }

    #[test]
    fn test_cli_without_input_fails() {
        let output = run(&["-w", "100"]);

        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stdout).contains("No input filename provided"));
        let stderr = String::from_utf8_lossy(&output.stderr);
        assert!(stderr.contains("Usage"));
        assert!(stderr.contains("--max"));
    }

    #[test]
    fn test_cli_missing_input_file_fails() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.child("missing.jpg");

        let output = run(&["-i", missing.path().to_str().unwrap()]);

        assert_eq!(output.status.code(), Some(1));
        assert!(String::from_utf8_lossy(&output.stderr).contains("failed to read input file"));
    }
}
