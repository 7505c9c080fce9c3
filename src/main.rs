//! Status light CLI tool
//!
//! Lists the supported and plugged USB status lights, generates udev rules for them and
//! previews the frames of the available color effects.

use std::fmt::{self, Display, Formatter};
use std::process;
use std::str::FromStr;

use clap::builder::EnumValueParser;
use clap::{
    crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command, ValueEnum,
};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use statuslight::{
    catalog, Blink, Effect, FamilyRef, Gradient, HidEnumerator, Rgb, Spectrum, Steady,
};

/// Default permissions for generated udev rules.
const DEFAULT_MODE: u32 = 0o666;

/// Color effect.
#[derive(ValueEnum, Default, PartialEq, Eq, Debug, Copy, Clone)]
enum EffectKind {
    Steady,
    Blink,
    Gradient,
    #[default]
    Spectrum,
}

/// Duty cycle of the spectrum effect.
#[derive(PartialEq, Copy, Clone)]
struct DutyCycle(f64);

impl Default for DutyCycle {
    fn default() -> Self {
        Self(1.)
    }
}

impl FromStr for DutyCycle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match f64::from_str(s) {
            Ok(value) if (0. ..=1.).contains(&value) => Ok(Self(value)),
            _ => Err(format!("invalid duty cycle '{}' [possible values: 0.0..=1.0]", s)),
        }
    }
}

impl Display for DutyCycle {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Effect preview config.
struct Config {
    effect: EffectKind,
    color: Rgb,
    steps: usize,
    count: u32,
    duty_cycle: DutyCycle,
    scale: f64,
    center: u8,
    width: u8,
}

impl Config {
    fn from_cli(effect: EffectKind, matches: &ArgMatches) -> Self {
        let mut config = Config { effect, ..Config::default() };

        replace_from_str(&mut config.color, matches, "color");
        replace_from_str(&mut config.steps, matches, "steps");
        replace_from_str(&mut config.count, matches, "count");
        replace_from_str(&mut config.duty_cycle, matches, "duty-cycle");
        replace_from_str(&mut config.scale, matches, "scale");
        replace_from_str(&mut config.center, matches, "center");
        replace_from_str(&mut config.width, matches, "width");

        config
    }

    /// Create the configured effect.
    fn effect(&self) -> statuslight::Result<Box<dyn Effect>> {
        Ok(match self.effect {
            EffectKind::Steady => Box::new(Steady::new(self.color)),
            EffectKind::Blink => Box::new(Blink::new(self.color, self.count)),
            EffectKind::Gradient => Box::new(Gradient::new(self.color, self.steps)?),
            EffectKind::Spectrum => Box::new(
                Spectrum::builder()
                    .duty_cycle(self.duty_cycle.0)
                    .scale(self.scale)
                    .steps(self.steps)
                    .window(self.center, self.width)
                    .build()?,
            ),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            effect: Default::default(),
            color: Rgb::WHITE,
            steps: 64,
            count: 0,
            duty_cycle: Default::default(),
            scale: 1.,
            center: 128,
            width: 127,
        }
    }
}

impl Display for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let default = Config::default();

        write!(f, "{} effect {:?}", crate_name!(), self.effect)?;

        if self.effect != EffectKind::Spectrum && self.color != default.color {
            write!(f, " --color {}", self.color)?;
        }

        if self.effect == EffectKind::Blink && self.count != default.count {
            write!(f, " --count {}", self.count)?;
        }

        if self.steps != default.steps {
            write!(f, " --steps {}", self.steps)?;
        }

        // Everything below only configures the spectrum.
        if self.effect != EffectKind::Spectrum {
            return Ok(());
        }

        if self.duty_cycle != default.duty_cycle {
            write!(f, " --duty-cycle {}", self.duty_cycle)?;
        }

        if self.scale != default.scale {
            write!(f, " --scale {}", self.scale)?;
        }

        if self.center != default.center || self.width != default.width {
            write!(f, " --center {} --width {}", self.center, self.width)?;
        }

        Ok(())
    }
}

fn main() {
    let cli = cli();

    init_tracing(cli.get_flag("verbose"));

    let result = match cli.subcommand() {
        Some(("supported", _)) => supported(),
        Some(("list", matches)) => list(matches),
        Some(("udev-rules", matches)) => udev_rules(matches),
        Some(("effect", matches)) => effect(matches),
        _ => Err("missing subcommand, see --help".into()),
    };

    if let Err(err) = result {
        error!("{}", err);
        eprintln!("\x1b[31mError:\x1b[0m {}", err);
        process::exit(1);
    }
}

/// Install the log subscriber, `RUST_LOG` takes precedence over `--verbose`.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
}

/// Print all lights of the built-in catalog.
fn supported() -> Result<(), String> {
    for (vendor, models) in catalog().root().supported_lights() {
        println!("{}", vendor);
        for model in models {
            println!("  - {}", model);
        }
    }

    Ok(())
}

/// Print all plugged lights.
fn list(matches: &ArgMatches) -> Result<(), String> {
    let family = family(matches)?;

    let lights = family.all_lights(&HidEnumerator::new(), false, false);
    if lights.is_empty() {
        println!("No supported lights found.");
        return Ok(());
    }

    for (i, light) in lights.iter().enumerate() {
        println!("[{}] {} {} ({})", i, light.vendor(), light.model(), light.family());
        for (key, value) in light.descriptor().fields() {
            println!("    {}: {}", key, value);
        }
    }

    Ok(())
}

/// Print udev rules for all supported lights.
fn udev_rules(matches: &ArgMatches) -> Result<(), String> {
    let mode = match matches.get_one::<String>("mode") {
        Some(mode) => u32::from_str_radix(mode.trim_start_matches("0o"), 8)
            .map_err(|err| format!("invalid mode '{}': {}", mode, err))?,
        None => DEFAULT_MODE,
    };

    for rule in family(matches)?.udev_rules(mode) {
        println!("{}", rule);
    }

    Ok(())
}

/// Print the frames of an effect.
fn effect(matches: &ArgMatches) -> Result<(), String> {
    let kind = *matches.get_one::<EffectKind>("name").unwrap_or(&EffectKind::default());
    let config = Config::from_cli(kind, matches);
    debug!("Effect config: {}", config);

    let effect = config.effect().map_err(|err| err.to_string())?;

    println!("# {} ({} frames per period)", effect, effect.colors().len());
    for color in effect.colors() {
        println!("{}", color);
    }

    Ok(())
}

/// Family selected with `--family`, defaulting to the catalog root.
fn family(matches: &ArgMatches) -> Result<FamilyRef<'static>, String> {
    match matches.get_one::<String>("family") {
        Some(name) => catalog().family(name).ok_or_else(|| format!("unknown family: {}", name)),
        None => Ok(catalog().root()),
    }
}

/// Get clap CLI parameters.
fn cli() -> ArgMatches {
    let family = Arg::new("family")
        .help("Restrict to a device family")
        .long("family")
        .short('f');

    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg(
            Arg::new("verbose")
                .help("Enable debug logging")
                .long("verbose")
                .short('v')
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .subcommand(Command::new("supported").about("List all supported lights"))
        .subcommand(Command::new("list").about("List plugged lights").arg(family.clone()))
        .subcommand(
            Command::new("udev-rules")
                .about("Print udev rules granting access to supported lights")
                .arg(family)
                .arg(Arg::new("mode").help("Device file mode in octal [default: 0666]").long("mode")),
        )
        .subcommand(
            Command::new("effect")
                .about("Print the frames of a color effect")
                .arg(
                    Arg::new("name")
                        .help("Effect name")
                        .ignore_case(true)
                        .value_parser(EnumValueParser::<EffectKind>::new()),
                )
                .arg(
                    Arg::new("color")
                        .help("Effect color in RGB [0xRRGGBB]")
                        .long("color")
                        .short('c'),
                )
                .arg(Arg::new("steps").help("Frames per period").long("steps").short('s'))
                .arg(Arg::new("count").help("Number of blinks, 0 blinks forever").long("count"))
                .arg(
                    Arg::new("duty-cycle")
                        .help("Fraction of the spectrum which is lit [possible values: 0.0..=1.0]")
                        .long("duty-cycle"),
                )
                .arg(Arg::new("scale").help("Spectrum brightness multiplier").long("scale"))
                .arg(Arg::new("center").help("Spectrum waveform center [0..=255]").long("center"))
                .arg(
                    Arg::new("width").help("Spectrum waveform amplitude [0..=255]").long("width"),
                ),
        )
        .get_matches()
}

/// Convert a CLI option from the parameter string.
#[inline]
fn cli_from_str<T>(matches: &ArgMatches, name: &str) -> Option<Result<T, <T as FromStr>::Err>>
where
    T: FromStr,
{
    matches.get_one::<String>(name).map(|value| T::from_str(value))
}

/// Replace config value with the CLI parameter if it is present.
#[inline]
fn replace_from_str<T: FromStr>(option: &mut T, matches: &ArgMatches, name: &str) {
    match cli_from_str(matches, name) {
        Some(Ok(value)) => *option = value,
        Some(Err(_)) => eprintln!("\x1b[31mIgnoring invalid --{} parameter.\x1b[0m", name),
        None => (),
    }
}
