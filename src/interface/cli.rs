use std::ffi::OsString;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{App, ArgMatches};

use crate::config::DemoConfig;
use crate::demos::DemoKind;

/// Everything the command line asked for.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub demo: DemoKind,
    pub config: Option<PathBuf>,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub title: Option<String>,
    pub wireframe: bool,
    pub vert: Option<PathBuf>,
    pub frag: Option<PathBuf>,
    pub textures: Vec<PathBuf>,
}

impl Options {
    pub fn from_env() -> Result<Self> {
        let yaml = load_yaml!("cli.yaml");
        let matches = App::from_yaml(yaml).get_matches();
        Self::from_matches(&matches)
    }

    /// Like [`Options::from_env`] but for an explicit argument list (first item is the binary
    /// name). Usage errors are returned instead of exiting.
    pub fn from_args<I, T>(args: I) -> Result<Self>
        where I: IntoIterator<Item = T>,
              T: Into<OsString> + Clone
    {
        let yaml = load_yaml!("cli.yaml");
        let matches = App::from_yaml(yaml).get_matches_from_safe(args)?;
        Self::from_matches(&matches)
    }

    fn from_matches(matches: &ArgMatches) -> Result<Self> {
        let demo = matches.value_of("DEMO")
            .unwrap_or("quad")
            .parse::<DemoKind>()?;

        let textures = matches.values_of("texture")
            .map(|v| v.map(PathBuf::from).collect())
            .unwrap_or_default();

        Ok(Self {
            demo,
            config: matches.value_of("config").map(PathBuf::from),
            width: parse_size(matches, "width")?,
            height: parse_size(matches, "height")?,
            title: matches.value_of("title").map(String::from),
            wireframe: matches.is_present("wireframe"),
            vert: matches.value_of("vert").map(PathBuf::from),
            frag: matches.value_of("frag").map(PathBuf::from),
            textures,
        })
    }

    /// Reads the config file if one was given, then applies the command line on top of it.
    pub fn resolve_config(&self) -> Result<DemoConfig> {
        let mut config = match &self.config {
            Some(path) => DemoConfig::load_from_file(path)?,
            None => DemoConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    pub fn apply(&self, config: &mut DemoConfig) {
        if let Some(width) = self.width {
            config.window.width = width;
        }
        if let Some(height) = self.height {
            config.window.height = height;
        }
        if let Some(title) = &self.title {
            config.window.title = title.clone();
        }
        if self.wireframe {
            config.render.wireframe = true;
        }
    }
}

fn parse_size(matches: &ArgMatches, name: &str) -> Result<Option<u32>> {
    match matches.value_of(name) {
        None => Ok(None),
        Some(v) => {
            let size = v.parse::<u32>()
                .with_context(|| format!("--{} expects a whole number of pixels, got {:?}", name, v))?;
            if size == 0 {
                anyhow::bail!("--{} must be greater than zero", name);
            }
            Ok(Some(size))
        }
    }
}
