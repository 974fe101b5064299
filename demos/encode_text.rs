use huffpack::{huffman, CodeTable, FrequencyMap};

fn main() -> huffpack::Result<()> {
    let s = String::from("Hello my name is Sam!");
    let freq: FrequencyMap<char> = s.chars().collect();
    let Some(tree) = huffman(&freq) else {
        return Ok(());
    };
    let table = CodeTable::from_tree(tree);

    let out = table.encoder().encode(s.chars())?;
    let dec: String = table.decoder().decode(&out)?.into_iter().collect();

    println!("{} bits: {:?}", out.len(), dec);
    Ok(())
}
