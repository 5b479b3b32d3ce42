use std::process::ExitCode;

use clap::{Parser, Subcommand};
use indicator_zkp::{
    DigestAlgorithm, Generator, IndicatorKind, ProofSession, ProofSubmission, Secret, SecureRng,
    Severity, SubmissionGate, VerificationPolicy, Verifier, ZkpConfig,
};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use zeroize::Zeroizing;

#[derive(Parser)]
#[command(name = "zkp")]
#[command(about = "Commit to threat indicators and check proof tokens", long_about = None)]
#[command(version)]
struct Cli {
    /// Commitment digest (overrides configuration)
    #[arg(long, global = true)]
    digest: Option<DigestAlgorithm>,

    /// Verification policy (overrides configuration)
    #[arg(long, global = true)]
    policy: Option<VerificationPolicy>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Commit to a secret indicator and print the commitment and proof
    Generate {
        /// Secret indicator; read from the first line of stdin when omitted
        #[arg(short, long)]
        secret: Option<String>,

        /// Also print the nonce, needed later to open the commitment
        #[arg(long)]
        reveal_nonce: bool,
    },

    /// Check a proof token against a commitment
    Verify {
        #[arg(short, long)]
        commitment: String,

        #[arg(short, long)]
        proof: String,
    },

    /// Check that a disclosed secret and nonce reproduce a commitment
    Open {
        #[arg(short, long)]
        commitment: String,

        #[arg(short, long)]
        secret: String,

        #[arg(short, long)]
        nonce: String,
    },

    /// Submit an indicator by proof
    Submit {
        #[arg(short, long)]
        commitment: String,

        #[arg(short, long)]
        proof: String,

        #[arg(short, long, default_value = "hash")]
        kind: IndicatorKind,

        #[arg(long, default_value = "medium")]
        severity: Severity,

        #[arg(short, long, default_value = "", help = "Comma-separated tags")]
        tags: String,

        #[arg(long)]
        source: Option<String>,
    },
}

fn load_config(cli: &Cli) -> Result<ZkpConfig, indicator_zkp::Error> {
    let mut config = ZkpConfig::from_env().unwrap_or_else(|e| {
        warn!("Ignoring configuration ({e}); using defaults");
        ZkpConfig::default()
    });

    if let Some(digest) = cli.digest {
        config.digest = digest;
    }
    if let Some(policy) = cli.policy {
        config.policy = policy;
    }

    config.validate()?;
    Ok(config)
}

async fn read_secret_from_stdin() -> std::io::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    BufReader::new(tokio::io::stdin())
        .read_line(&mut line)
        .await?;
    Ok(strip_line_ending(line))
}

fn strip_line_ending(mut line: Zeroizing<String>) -> Zeroizing<String> {
    let len = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(len);
    line
}

async fn run(cli: Cli) -> Result<ExitCode, Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    info!(digest = %config.digest, policy = ?config.policy, "configuration loaded");

    match cli.command {
        Commands::Generate {
            secret,
            reveal_nonce,
        } => {
            let secret = match secret {
                Some(secret) => Zeroizing::new(secret),
                None => read_secret_from_stdin().await?,
            };

            if reveal_nonce {
                let mut rng = SecureRng::new();
                let (nonce, commitment) =
                    Generator::from_config(&config)?.generate(&mut rng, Secret::new(secret.as_str())?)?;
                let proof = indicator_zkp::encode_token(&commitment, &nonce);
                println!("commitment: {commitment}");
                println!("proof:      {proof}");
                println!("nonce:      {}", nonce.as_str());
            } else {
                let session = ProofSession::new(&config)?;
                let issued = session.generate(&secret).await?;
                println!("commitment: {}", issued.commitment);
                println!("proof:      {}", issued.proof);
            }
            Ok(ExitCode::SUCCESS)
        }

        Commands::Verify { commitment, proof } => {
            let session = ProofSession::new(&config)?;
            let result = session.verify(&commitment, &proof).await?;
            match result.reason {
                None => {
                    println!("Verification successful");
                    Ok(ExitCode::SUCCESS)
                }
                Some(reason) => {
                    println!("Verification failed: {reason}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Open {
            commitment,
            secret,
            nonce,
        } => {
            let verifier = Verifier::from_config(&config)?;
            match verifier.open(&commitment, Secret::new(secret)?, &nonce) {
                Ok(()) => {
                    println!("Opening matches commitment");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    println!("Opening rejected: {e}");
                    Ok(ExitCode::FAILURE)
                }
            }
        }

        Commands::Submit {
            commitment,
            proof,
            kind,
            severity,
            tags,
            source,
        } => {
            let gate = SubmissionGate::from_config(&config)?;
            let receipt = gate
                .submit(ProofSubmission {
                    commitment,
                    proof,
                    kind,
                    severity,
                    tags,
                    source,
                })
                .await?;
            println!("Submission accepted");
            println!("  id:       {}", receipt.id);
            println!("  kind:     {}", receipt.kind);
            println!("  severity: {}", receipt.severity);
            if !receipt.tags.is_empty() {
                println!("  tags:     {}", receipt.tags.join(", "));
            }
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
