//! Log output setup.

use log::LevelFilter;

/// Installs a stderr logger at the given level name, falling back to `info`.
pub fn init(level: &str) {
    let (filter, unknown) = match level.parse::<LevelFilter>() {
        Ok(filter) => (filter, false),
        Err(_) => (LevelFilter::Info, true),
    };

    let result = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(filter)
        .chain(std::io::stderr())
        .apply();

    if let Err(err) = result {
        eprintln!("Could not install logger: {err}");
    }
    if unknown {
        log::warn!("Unknown log level `{level}`, using info");
    }
}
