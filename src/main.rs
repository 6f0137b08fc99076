#[macro_use] extern crate clap;

pub mod config;
pub mod demos;
pub mod graphics;
pub mod interface;

use std::process;

use anyhow::Result;
use log::{error, info};
use shader::ShaderProgram;

use crate::demos::{load_textures, resolve_shader_sources, Scene};
use crate::interface::cli::Options;
use crate::interface::window;

fn run() -> Result<()> {
    let opts = Options::from_env()?;
    let config = opts.resolve_config()?;

    // Everything read from disk is loaded before the window opens, so a bad path fails fast
    let (vert, frag) = resolve_shader_sources(opts.demo, opts.vert.as_deref(), opts.frag.as_deref())?;
    let images = load_textures(opts.demo, &opts.textures)?;

    let (events, context) = window::open(&config)?;
    window::prepare_gl()?;

    let program = ShaderProgram::from_sources(&vert, &frag).map_err(|e| {
        error!("Could not compile/link shaders");
        e
    })?;

    let scene = Scene::build(opts.demo, program, &images)?;
    info!("Running the {} demo", opts.demo);

    window::run(config, events, context, scene)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        error!("{:#}", e);
        process::exit(1);
    }
}
