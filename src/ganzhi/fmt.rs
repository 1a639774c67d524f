//! 农历日期文本格式化

/// 汉数字，第 `1..=9` 项分别为「一」到「九」。为便于格式化日期，第 0 项为「十」。
pub const NUM_CHINESE: &[&str] = &["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

/// 取得月名（含「月」字）。十一、十二月称「冬月」「腊月」。
///
/// # 用例
///
/// ```
/// use sizhu::ganzhi::fmt;
///
/// assert_eq!("正月", fmt::month(1));
/// assert_eq!("腊月", fmt::month(12));
/// ```
///
/// # Panics
///
/// 若月序号不在 `1..=12` 间则 panic。
pub fn month(m: u32) -> String {
    match m {
        1 => "正",
        2..=9 => NUM_CHINESE[m as usize],
        10 => "十",
        11 => "冬",
        12 => "腊",
        _ => panic!("month {} not in 1..=12", m),
    }
    .to_owned()
        + "月"
}

/// 取得日名，前十日为「初一」到「初十」，第 21 至 29 日为「廿一」到「廿九」。
///
/// # 用例
///
/// ```
/// use sizhu::ganzhi::fmt;
///
/// assert_eq!("初十", fmt::day(10));
/// assert_eq!("廿五", fmt::day(25));
/// assert_eq!("三十", fmt::day(30));
/// ```
///
/// # Panics
///
/// 若日序号不在 `1..=30` 间则 panic。
pub fn day(d: u32) -> String {
    match d {
        1..=10 => "初",
        11..=19 => "十",
        20 => "二",
        21..=29 => "廿",
        30 => "三",
        _ => panic!("day {} not in 1..=30", d),
    }
    .to_owned()
        + NUM_CHINESE[(d % 10) as usize]
}
