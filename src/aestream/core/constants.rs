//! Lookup tables for the round functions and the key schedule. Every table is built by a `const fn`
//! at compile time, so the hot path is nothing but indexing.

/// Multiplication in GF(2^8) modulo the AES polynomial x^8 + x^4 + x^3 + x + 1.
const fn gf_mul(mut a: u8, mut b: u8) -> u8 {
    let mut product = 0u8;
    while b != 0 {
        if b & 1 != 0 {
            product ^= a;
        }
        let carry = a & 0x80;
        a <<= 1;
        if carry != 0 {
            a ^= 0x1b;
        }
        b >>= 1;
    }
    product
}

/// Walks the multiplicative group with generator 3. `p` steps forward (p * 3) while `q` steps
/// backwards (q * 3^-1), so `q` is always the inverse of `p` and only the affine map is left to apply.
const fn build_sbox() -> [u8; 256] {
    let mut sbox = [0u8; 256];
    let mut p: u8 = 1;
    let mut q: u8 = 1;

    loop {
        // p * 3
        p = p ^ (p << 1) ^ (if p & 0x80 != 0 { 0x1b } else { 0 });

        // q / 3, i.e. q * 0xf6
        q ^= q << 1;
        q ^= q << 2;
        q ^= q << 4;
        if q & 0x80 != 0 {
            q ^= 0x09;
        }

        // affine transformation
        let x = q ^ q.rotate_left(1) ^ q.rotate_left(2) ^ q.rotate_left(3) ^ q.rotate_left(4);
        sbox[p as usize] = x ^ 0x63;

        if p == 1 {
            break;
        }
    }

    // zero has no inverse and is mapped on its own
    sbox[0] = 0x63;
    sbox
}

const fn invert(table: &[u8; 256]) -> [u8; 256] {
    let mut inv = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        inv[table[i] as usize] = i as u8;
        i += 1;
    }
    inv
}

const fn mul_table(factor: u8) -> [u8; 256] {
    let mut table = [0u8; 256];
    let mut i = 0;
    while i < 256 {
        table[i] = gf_mul(i as u8, factor);
        i += 1;
    }
    table
}

const fn build_rcon() -> [u8; 10] {
    let mut rcon = [0u8; 10];
    let mut x = 1u8;
    let mut i = 0;
    while i < 10 {
        rcon[i] = x;
        x = gf_mul(x, 2);
        i += 1;
    }
    rcon
}

/// Forward substitution box.
pub const SBOX: [u8; 256] = build_sbox();

/// Inverse substitution box, `SBOX_INV[SBOX[x]] == x`.
pub const SBOX_INV: [u8; 256] = invert(&SBOX);

pub const GMUL2: [u8; 256] = mul_table(2);
pub const GMUL3: [u8; 256] = mul_table(3);
pub const GMUL9: [u8; 256] = mul_table(9);
pub const GMUL11: [u8; 256] = mul_table(11);
pub const GMUL13: [u8; 256] = mul_table(13);
pub const GMUL14: [u8; 256] = mul_table(14);

/// Round constants for the key schedule. `RCON[i]` is x^i in GF(2^8) and is used by the word
/// generated at the start of key-expansion round `i + 1`.
pub const RCON: [u8; 10] = build_rcon();
