use huffpack::{Archive, Codec, CodecOptions};
use std::env;
use std::fs;

fn main() -> huffpack::Result<()> {
    let Some(fp) = env::args().nth(1) else {
        eprintln!("Please provide path to input file as first argument.");
        std::process::exit(2);
    };

    let text = fs::read_to_string(fp)?;
    let codec = Codec::new(CodecOptions::default().strip_trailing_whitespace(false));

    // encode scope - save to file
    {
        let compressed = codec.compress(&text)?;
        fs::write("encoded.mp", Archive::new(&compressed).to_bytes()?)?;
    }

    // decode scope - read from file
    {
        let file_data = fs::read("encoded.mp")?;
        let compressed = Archive::from_bytes(&file_data)?.into_compressed()?;
        let decoded = codec.decompress(&compressed)?;

        fs::write("decoded.txt", decoded)?;
    }

    Ok(())
}
