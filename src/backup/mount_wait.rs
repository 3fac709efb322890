use colored::Colorize;
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

use crate::config::BackupConfig;
use crate::platform::MountProbe;
use crate::prompt::Prompter;

/// Make sure the backup volume is mounted, asking the operator to wait,
/// retry or cancel. There is no timeout; only the operator ends the wait.
pub fn ensure_mounted<R: BufRead, W: Write>(
    probe: &dyn MountProbe,
    config: &BackupConfig,
    prompter: &mut Prompter<R, W>,
) -> io::Result<bool> {
    let mount_point = config.mount_point();
    if probe.is_mounted(&mount_point) {
        return Ok(true);
    }

    writeln!(
        prompter.output(),
        "\n{} {} is NOT mounted.",
        "!".yellow().bold(),
        mount_point.display()
    )?;
    request_mount(probe, config, prompter)?;

    loop {
        let question = format!(
            "Waiting for mount at {}... (Ready? [y]/Retry [r]/Cancel [c]): ",
            mount_point.display()
        );
        let Some(answer) = prompter.ask(&question)? else {
            return Ok(false);
        };

        match answer.trim().to_lowercase().as_str() {
            "" | "y" => {
                if probe.is_mounted(&mount_point) {
                    writeln!(prompter.output(), "{}", "Successfully mounted!".green())?;
                    info!("{} mounted", mount_point.display());
                    return Ok(true);
                }
                writeln!(
                    prompter.output(),
                    "{}",
                    "Still not mounted. Please check the mount dialog.".red()
                )?;
            }
            "r" => request_mount(probe, config, prompter)?,
            _ => {
                info!("Mount wait cancelled by operator");
                return Ok(false);
            }
        }
    }
}

fn request_mount<R: BufRead, W: Write>(
    probe: &dyn MountProbe,
    config: &BackupConfig,
    prompter: &mut Prompter<R, W>,
) -> io::Result<()> {
    let Some(url) = config.remote_url.as_deref() else {
        writeln!(prompter.output(), "No remote URL configured; mount the volume manually.")?;
        return Ok(());
    };

    writeln!(prompter.output(), "Trying to mount: {}", url)?;
    match probe.request_mount(url) {
        Ok(()) => writeln!(
            prompter.output(),
            "Sent mount request. Please check for a login window if it appears."
        ),
        Err(e) => {
            warn!("Mount request failed: {}", e);
            writeln!(prompter.output(), "Mount request failed: {}", e)
        }
    }
}
