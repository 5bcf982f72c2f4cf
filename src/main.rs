//! Host-side helper.
//!
//! `cargo run` builds the wasm package into `static/pkg` and serves `static/`
//! on `BACKDROP_PORT` (default 8000). `cargo run -- shader <preset>` prints the
//! composed fragment shader for a preset, and `cargo run -- sample <preset>`
//! renders a coarse preview of the storm preset on the terminal.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    cli::run()
}

// The browser entry point lives in the library.
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod cli {
    use std::process::{Command, Stdio};
    use std::{env, thread, time::Duration};

    use anyhow::{bail, Context, Result};
    use storm_backdrop::{shade, shaders, Preset, UniformSet};

    pub fn run() -> Result<()> {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

        let args: Vec<String> = env::args().skip(1).collect();
        match args.first().map(String::as_str) {
            None | Some("serve") => serve(),
            Some("shader") => {
                let preset = preset_arg(args.get(1))?;
                print!("{}", shaders::fragment_source(preset));
                Ok(())
            }
            Some("sample") => {
                let preset = preset_arg(args.get(1))?;
                sample(preset)
            }
            Some(other) => bail!("unknown command `{other}` (expected serve, shader or sample)"),
        }
    }

    fn preset_arg(arg: Option<&String>) -> Result<Preset> {
        match arg {
            None => Ok(Preset::default()),
            Some(id) => Preset::from_id(id).with_context(|| {
                let known: Vec<&str> = Preset::all().iter().map(|p| p.id()).collect();
                format!("unknown preset `{id}`; known presets: {}", known.join(", "))
            }),
        }
    }

    /// Rough luminance preview: one character per cell.
    fn sample(preset: Preset) -> Result<()> {
        if preset != Preset::Storm {
            bail!("only the storm preset has a host-side reference");
        }
        let uniforms = UniformSet::new(preset.config().light_color, [80.0, 24.0]);
        const RAMP: &[u8] = b" .:-=+*#%@";
        for row in (0..24).rev() {
            let line: String = (0..80)
                .map(|col| {
                    let uv = [(col as f32 + 0.5) / 80.0, (row as f32 + 0.5) / 24.0];
                    let c = shade::storm_pixel(uv, &uniforms);
                    let luma = (0.2126 * c.r + 0.7152 * c.g + 0.0722 * c.b).clamp(0.0, 1.0);
                    RAMP[(luma * (RAMP.len() - 1) as f32).round() as usize] as char
                })
                .collect();
            println!("{line}");
        }
        Ok(())
    }

    fn serve() -> Result<()> {
        let port = env::var("BACKDROP_PORT").unwrap_or_else(|_| "8000".to_string());

        log::info!("building wasm package");
        match Command::new("wasm-pack")
            .args(["build", "--release", "--target", "web", "--out-dir", "static/pkg"])
            .status()
        {
            Ok(status) if status.success() => {}
            Ok(status) => bail!("wasm-pack exited with {status}"),
            Err(_) => log::warn!(
                "wasm-pack not found in PATH (https://rustwasm.github.io/wasm-pack/); serving existing static/pkg"
            ),
        }

        log::info!("serving static/ at http://127.0.0.1:{port}");
        let mut server = Command::new("python3")
            .args(["-m", "http.server", port.as_str(), "--directory", "static"])
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .context("failed to start python3 http.server")?;

        loop {
            if let Some(status) = server.try_wait()? {
                bail!("http server exited with {status}");
            }
            thread::sleep(Duration::from_secs(1));
        }
    }
}
