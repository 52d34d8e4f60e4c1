//! BLOSUM62 打分矩阵。
//!
//! 纯查表模块：残基对替换得分、固定 gap 罚分，以及三条序列一列上的
//! sum-of-pairs 得分。没有任何可变状态。

use crate::error::{Error, Result};

/// gap 占位符
pub const GAP: u8 = b'-';

/// 矩阵行列顺序对应的 20 个氨基酸
pub const ALPHABET: &[u8; 20] = b"ARNDCQEGHILKMFPSTWYV";

const GAP_COST: i32 = -6;

#[rustfmt::skip]
const MATRIX: [[i8; 20]; 20] = [
    //  A   R   N   D   C   Q   E   G   H   I   L   K   M   F   P   S   T   W   Y   V
    [   4, -1, -2, -2,  0, -1, -1,  0, -2, -1, -1, -1, -1, -2, -1,  1,  0, -3, -2,  0], // A
    [  -1,  5,  0, -2, -3,  1,  0, -2,  0, -3, -2,  2, -1, -3, -2, -1, -1, -3, -2, -3], // R
    [  -2,  0,  6,  1, -3,  0,  0,  0,  1, -3, -3,  0, -2, -3, -2,  1,  0, -4, -2, -3], // N
    [  -2, -2,  1,  6, -3,  0,  2, -1, -1, -3, -4, -1, -3, -3, -1,  0, -1, -4, -3, -3], // D
    [   0, -3, -3, -3,  9, -3, -4, -3, -3, -1, -1, -3, -1, -2, -3, -1, -1, -2, -2, -1], // C
    [  -1,  1,  0,  0, -3,  5,  2, -2,  0, -3, -2,  1,  0, -3, -1,  0, -1, -2, -1, -2], // Q
    [  -1,  0,  0,  2, -4,  2,  5, -2,  0, -3, -3,  1, -2, -3, -1,  0, -1, -3, -2, -2], // E
    [   0, -2,  0, -1, -3, -2, -2,  6, -2, -4, -4, -2, -3, -3, -2,  0, -2, -2, -3, -3], // G
    [  -2,  0,  1, -1, -3,  0,  0, -2,  8, -3, -3, -1, -2, -1, -2, -1, -2, -2,  2, -3], // H
    [  -1, -3, -3, -3, -1, -3, -3, -4, -3,  4,  2, -3,  1,  0, -3, -2, -1, -3, -1,  3], // I
    [  -1, -2, -3, -4, -1, -2, -3, -4, -3,  2,  4, -2,  2,  0, -3, -2, -1, -2, -1,  1], // L
    [  -1,  2,  0, -1, -3,  1,  1, -2, -1, -3, -2,  5, -1, -3, -1,  0, -1, -3, -2, -2], // K
    [  -1, -1, -2, -3, -1,  0, -2, -3, -2,  1,  2, -1,  5,  0, -2, -1, -1, -1, -1,  1], // M
    [  -2, -3, -3, -3, -2, -3, -3, -3, -1,  0,  0, -3,  0,  6, -4, -2, -2,  1,  3, -1], // F
    [  -1, -2, -2, -1, -3, -1, -1, -2, -2, -3, -3, -1, -2, -4,  7, -1, -1, -4, -3, -2], // P
    [   1, -1,  1,  0, -1,  0,  0,  0, -1, -2, -2,  0, -1, -2, -1,  4,  1, -3, -2, -2], // S
    [   0, -1,  0, -1, -1, -1, -1, -2, -2, -1, -1, -1, -1, -2, -1,  1,  5, -2, -2,  0], // T
    [  -3, -3, -4, -4, -2, -2, -3, -2, -2, -3, -2, -3, -1,  1, -4, -3, -2, 11,  2, -3], // W
    [  -2, -2, -2, -3, -2, -1, -2, -3,  2, -1, -1, -2, -1,  3, -3, -2, -2,  2,  7, -1], // Y
    [   0, -3, -3, -3, -1, -2, -2, -3, -3,  3,  1, -2,  1, -1, -2, -2,  0, -3, -1,  4], // V
];

#[inline]
fn residue_index(b: u8) -> Option<usize> {
    let idx = match b {
        b'A' => 0,
        b'R' => 1,
        b'N' => 2,
        b'D' => 3,
        b'C' => 4,
        b'Q' => 5,
        b'E' => 6,
        b'G' => 7,
        b'H' => 8,
        b'I' => 9,
        b'L' => 10,
        b'K' => 11,
        b'M' => 12,
        b'F' => 13,
        b'P' => 14,
        b'S' => 15,
        b'T' => 16,
        b'W' => 17,
        b'Y' => 18,
        b'V' => 19,
        _ => return None,
    };
    Some(idx)
}

#[inline]
pub fn is_residue(b: u8) -> bool {
    residue_index(b).is_some()
}

/// 残基与 gap 对齐的罚分（与残基无关）
#[inline]
pub fn gap_cost() -> i32 {
    GAP_COST
}

/// 两个符号对齐的得分：
/// - 两个残基：矩阵条目（对称）
/// - 恰好一个是 gap：[`gap_cost`]
/// - 两个都是 gap：0
pub fn score(a: u8, b: u8) -> Result<i32> {
    match (a == GAP, b == GAP) {
        (true, true) => Ok(0),
        (true, false) => lookup(b).map(|_| GAP_COST),
        (false, true) => lookup(a).map(|_| GAP_COST),
        (false, false) => Ok(MATRIX[lookup(a)?][lookup(b)?] as i32),
    }
}

/// 三个符号构成一列时的 sum-of-pairs 得分：三个无序对得分之和
pub fn sum_of_pairs(a: u8, b: u8, c: u8) -> Result<i32> {
    Ok(score(a, b)? + score(b, c)? + score(a, c)?)
}

/// 返回序列中第一个非法残基的 (偏移, 字符)
pub fn first_invalid(seq: &[u8]) -> Option<(usize, u8)> {
    seq.iter()
        .enumerate()
        .find(|&(_, &b)| !is_residue(b))
        .map(|(i, &b)| (i, b))
}

fn lookup(b: u8) -> Result<usize> {
    residue_index(b).ok_or(Error::InvalidSymbol { symbol: b as char })
}
