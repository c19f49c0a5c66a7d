extern crate bencher;

use glyph_fpe::presets::AlphabetPreset;
use glyph_fpe::unicode::UnicodeFPECipher;

// the dispatcher should sustain north of 30k word encryptions per
// second per thread; run with `cargo bench` to check a build

fn build_ascii(b: &mut bencher::Bencher) {
    b.iter(|| UnicodeFPECipher::from_preset(AlphabetPreset::Ascii, &[0; 16], &[0; 4]).unwrap());
}

fn encrypt_word(b: &mut bencher::Bencher) {
    let cipher = UnicodeFPECipher::from_preset(AlphabetPreset::Ascii, &[0; 16], &[0; 4]).unwrap();
    b.iter(|| cipher.encrypt("administration"));
}

fn decrypt_word(b: &mut bencher::Bencher) {
    let cipher = UnicodeFPECipher::from_preset(AlphabetPreset::Ascii, &[0; 16], &[0; 4]).unwrap();
    let ct = cipher.encrypt("administration").unwrap();
    b.iter(|| cipher.decrypt(&ct));
}

fn encrypt_mixed_scripts(b: &mut bencher::Bencher) {
    let cipher =
        UnicodeFPECipher::from_preset(AlphabetPreset::UnicodeBlocks, &[0; 16], &[0; 4]).unwrap();
    b.iter(|| cipher.encrypt("Account 12345 こんにちは 世界"));
}

bencher::benchmark_group!(
    benches,
    build_ascii,
    encrypt_word,
    decrypt_word,
    encrypt_mixed_scripts
);
bencher::benchmark_main!(benches);
