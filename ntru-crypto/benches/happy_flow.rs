use criterion::{Criterion, black_box, criterion_group, criterion_main};
use ntru_crypto::keypair::{KeyPair, NtruParams};
use ntru_crypto::ring::Polynomial;
use ntru_crypto::{decrypt, encrypt};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_happy_flow(c: &mut Criterion) {
    // 1) one-time setup
    let params = NtruParams::try_with(107, 3, 1024).expect("build params");
    let mut rng = StdRng::seed_from_u64(12345);
    let key_pair = KeyPair::generate(&params, &mut rng).expect("generate key pair");

    // the same message every iteration
    let message = Polynomial::from_coeffs((0..107).map(|i| i % 3).collect());

    c.bench_function("keygen_n107", |b| {
        b.iter(|| KeyPair::generate(black_box(&params), &mut rng).expect("keygen"))
    });

    c.bench_function("happy_flow_n107", |b| {
        b.iter(|| {
            // 2) encrypt
            let ciphertext =
                encrypt(black_box(&message), &key_pair.public_key, &mut rng).expect("encrypt");

            // 3) decrypt
            let recovered = decrypt(&ciphertext, &key_pair.private_key).expect("decrypt");

            black_box(recovered);
        })
    });
}

criterion_group!(benches, bench_happy_flow);
criterion_main!(benches);
