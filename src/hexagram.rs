//! 小六壬起卦
//!
//! 依三个数字推算「小六壬」三宫词组。本模块不含随机性，
//! 随机数由调用方提供（惯例为均匀随机的正整数）。

use crate::error::{Error, Result};

/// 六宫词表，按宫位顺序排列。
pub const WORDS: [&str; 6] = ["大安", "留连", "速喜", "赤口", "小吉", "空亡"];

/// 依三个数字起卦，返回以空格相连的三宫词组。
///
/// 三宫序数依次为 `n₁`、`n₁+n₂−1`、`n₁+n₂+n₃−2`，各对 6 取模后以
/// 「逢零作六」折回 1 至 6。对任意整数输入均有定义，输入不足或超过
/// 三个数字时报 [`Error::InvalidArgument`]。
///
/// # 用例
///
/// ```
/// use sizhu::hexagram;
///
/// assert_eq!("大安 大安 大安", hexagram::generate(&[1, 1, 1]).unwrap());
/// assert_eq!("空亡 小吉 赤口", hexagram::generate(&[6, 6, 6]).unwrap());
/// ```
pub fn generate(numbers: &[i64]) -> Result<String> {
    let [first, second, third] = numbers else {
        return Err(Error::InvalidArgument(numbers.len()));
    };

    let words = [
        word(*first),
        word(first + second - 1),
        word(first + second + third - 2),
    ];
    Ok(words.join(" "))
}

/// 序数折回 1 至 6 后取宫位词，即 `((n − 1) mod 6) + 1`。
fn word(n: i64) -> &'static str {
    WORDS[(n - 1).rem_euclid(6) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deterministic() {
        assert_eq!("大安 大安 大安", generate(&[1, 1, 1]).unwrap());
        assert_eq!("空亡 小吉 赤口", generate(&[6, 6, 6]).unwrap());
        assert_eq!("速喜 空亡 赤口", generate(&[3, 4, 5]).unwrap());
    }

    #[test]
    fn periodic_mod_six() {
        assert_eq!(generate(&[1, 1, 1]), generate(&[7, 1, 1]));
        assert_eq!(generate(&[2, 3, 4]), generate(&[8, 9, 10]));
    }

    #[test]
    fn any_integer_is_defined() {
        assert_eq!("空亡 空亡 空亡", generate(&[0, 1, 1]).unwrap());
        assert!(generate(&[-5, -7, 100]).is_ok());
    }

    #[test]
    fn wrong_arity_rejected() {
        for numbers in [&[][..], &[1][..], &[1, 2][..], &[1, 2, 3, 4][..]] {
            assert_eq!(
                Err(Error::InvalidArgument(numbers.len())),
                generate(numbers)
            );
        }
    }
}
