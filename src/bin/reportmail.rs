use clap::Parser;
use reportmail::analysis::{AnalysisArtifacts, AnalysisOutcome, Analyzer};
use reportmail::config::{self, CliConfig, Config};
use reportmail::core::Result;
use reportmail::mail::{self, EmailRequest, MailSettings, SendMail, SmtpMailer};
use reportmail::reporting::logging;
use reportmail::ui::output;
use reportmail::ui::{Cli, cli_to_config};

use std::path::Path;

fn main() {
    let cli = Cli::parse();

    match run_reportmail_logic(&cli) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main analyze-and-mail logic extracted from main() for testing
pub fn run_reportmail_logic(cli: &Cli) -> Result<i32> {
    let cli_config = cli_to_config(cli);
    let working_dir = std::env::current_dir()?;

    // .env values land in the process environment before config is merged
    let dotenv_path = config::load_dotenv();
    let config = load_and_merge_config(&cli_config, &working_dir)?;

    let output_settings = setup_output_settings(&cli_config, &config);
    logging::init_logger(output_settings.verbose, output_settings.quiet);
    logging::log_dotenv(dotenv_path.as_deref());
    logging::log_config_info(&config, &working_dir);

    analyze_and_mail(
        &config,
        &output_settings,
        &working_dir,
        SmtpMailer::new,
    )
}

/// Load configuration from file or standard locations, then merge the
/// environment and CLI over it
pub fn load_and_merge_config(cli_config: &CliConfig, working_dir: &Path) -> Result<Config> {
    let mut config = if cli_config.no_config {
        Config::default()
    } else if let Some(ref config_file) = cli_config.config_file {
        Config::load_from_file(config_file).inspect_err(|e| {
            logging::log_error(
                &format!("Could not load config file '{config_file}'"),
                Some(e),
            );
        })?
    } else {
        Config::load_from_standard_locations(working_dir)
    };

    config.merge_with_process_env()?;
    config.merge_with_cli(cli_config);
    config.validate()?;
    Ok(config)
}

/// Settings for output and delivery
pub struct OutputSettings {
    pub quiet: bool,
    pub verbose: bool,
    pub send_email: bool,
}

/// Setup output settings based on CLI and config
pub fn setup_output_settings(cli_config: &CliConfig, config: &Config) -> OutputSettings {
    OutputSettings {
        quiet: cli_config.quiet,
        verbose: config.verbose.unwrap_or(false),
        send_email: !cli_config.no_email,
    }
}

/// Analyze the configured report and, unless disabled, mail the results.
///
/// `connect` builds the mailer from resolved settings; it is only called
/// once the analysis has completed.
pub fn analyze_and_mail<M, F>(
    config: &Config,
    output_settings: &OutputSettings,
    working_dir: &Path,
    connect: F,
) -> Result<i32>
where
    M: SendMail,
    F: FnOnce(&MailSettings) -> Result<M>,
{
    let report_path = config.report_path(working_dir);
    let analyzer = Analyzer::from_config(config, working_dir);

    let artifacts = match analyzer.analyze(&report_path).inspect_err(|e| {
        logging::log_error("Could not analyze report", Some(e));
    })? {
        AnalysisOutcome::Completed(artifacts) => artifacts,
        AnalysisOutcome::InvalidFormat => {
            output::display_invalid_format();
            return Ok(0);
        }
    };

    if !output_settings.quiet {
        output::display_analysis_written(&artifacts.log_path);
        output::display_summary(&artifacts.summary);
        output::display_analysis_complete();
    }

    if !output_settings.send_email {
        if !output_settings.quiet {
            output::display_email_skipped();
        }
        return Ok(0);
    }

    let settings = config.mail_settings()?;
    let mailer = connect(&settings)?;
    send_report(&mailer, &settings, config.subject(), &artifacts)?;

    if !output_settings.quiet {
        output::display_email_sent(&settings.recipient.email.to_string());
    }
    Ok(0)
}

/// Mail the log and the formatted report with the summary as body
pub fn send_report<M: SendMail + ?Sized>(
    mailer: &M,
    settings: &MailSettings,
    subject: &str,
    artifacts: &AnalysisArtifacts,
) -> Result<()> {
    let request = EmailRequest {
        subject: subject.to_string(),
        body: artifacts.email_body.clone(),
        attachments: artifacts.attachments(),
    };
    mail::deliver(mailer, settings, &request)
}
