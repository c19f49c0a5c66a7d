extern crate bencher;

use glyph_fpe::ff1::FF1Cipher;

fn context(b: &mut bencher::Bencher) {
    b.iter(|| FF1Cipher::new(&[0; 32], &[], 26).unwrap());
}

fn encrypt(b: &mut bencher::Bencher) {
    let ff1 = FF1Cipher::new(&[0; 32], &[], 26).unwrap();
    let digits: Vec<u32> = (0..10).collect();
    b.iter(|| ff1.encrypt(&digits));
}

fn decrypt(b: &mut bencher::Bencher) {
    let ff1 = FF1Cipher::new(&[0; 32], &[], 26).unwrap();
    let digits: Vec<u32> = (0..10).collect();
    let ct = ff1.encrypt(&digits).unwrap();
    b.iter(|| ff1.decrypt(&ct));
}

bencher::benchmark_group!(benches, context, encrypt, decrypt);
bencher::benchmark_main!(benches);
