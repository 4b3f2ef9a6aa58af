//! Encode and decode commands - base64 text conversion.

use anyhow::Result;

use deskmate_cli::system::text;

/// Arguments for the encode command.
#[derive(clap::Args)]
pub struct EncodeArgs {
    /// Text to encode; words are joined with spaces
    #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub text: Vec<String>,
}

/// Arguments for the decode command.
#[derive(clap::Args)]
pub struct DecodeArgs {
    /// Base64 input
    pub data: String,
}

pub fn run_encode(args: EncodeArgs) -> Result<()> {
    println!("{}", text::encode_base64(&args.text.join(" ")));
    Ok(())
}

pub fn run_decode(args: DecodeArgs) -> Result<()> {
    println!("{}", text::decode_base64(&args.data)?);
    Ok(())
}
