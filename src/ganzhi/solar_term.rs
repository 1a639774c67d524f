//! 节气推算
//!
//! 自 1900 年小寒的参考儒略日起，按回归年长与逐节气的累积秒数估算各节气
//! 时刻，用于划分干支月。精度为日级，与参考算法一致。

use chrono::{Datelike, NaiveDate};

/// 二十四节气名，自小寒起按公历年内顺序排列。
pub const TERM_NAMES: [&str; 24] = [
    "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种",
    "夏至", "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪",
    "大雪", "冬至",
];

/// 划分干支月的十二「节」，各项为 `(节气序号, 干支月序, 月支)`。
///
/// 干支月序 0 为寅月（立春起）。
const MONTH_BOUNDARY_TERMS: [(usize, u32, &str); 12] = [
    (2, 0, "寅"),  // 立春
    (4, 1, "卯"),  // 惊蛰
    (6, 2, "辰"),  // 清明
    (8, 3, "巳"),  // 立夏
    (10, 4, "午"), // 芒种
    (12, 5, "未"), // 小暑
    (14, 6, "申"), // 立秋
    (16, 7, "酉"), // 白露
    (18, 8, "戌"), // 寒露
    (20, 9, "亥"), // 立冬
    (22, 10, "子"), // 大雪
    (0, 11, "丑"), // 小寒
];

/// 各节气自当年小寒起的累积秒数。
const TERM_OFFSET_SECONDS: [f64; 24] = [
    0.00,
    1_272_494.40,
    2_548_020.60,
    3_830_143.80,
    5_120_226.60,
    6_420_865.80,
    7_732_018.80,
    9_055_272.60,
    10_388_958.00,
    11_733_065.40,
    13_084_292.40,
    14_441_592.00,
    15_800_560.80,
    17_159_347.20,
    18_513_766.20,
    19_862_002.20,
    21_201_005.40,
    22_529_659.80,
    23_846_845.20,
    25_152_606.00,
    26_447_687.40,
    27_733_451.40,
    29_011_921.20,
    30_285_477.60,
];

/// 1900 年小寒的参考儒略日。
const EPOCH_XIAOHAN_JD: f64 = 2415025.5868055555;
/// 回归年长（日）。
const TROPICAL_YEAR_DAYS: f64 = 365.24219878;

/// 计算公历日期的儒略日。
///
/// 与参考算法一致，日数附加常量 0.5000115740，使结果对准当日正午附近，
/// 便于与节气时刻作 ±0.5 日的同日比较。
pub(crate) fn julian_day(date: NaiveDate) -> f64 {
    let mut year = date.year();
    let mut month = date.month() as i32;
    let day = date.day();
    if month <= 2 {
        month += 12;
        year -= 1;
    }
    let b = 2.0 - (year as f64 / 100.0).floor() + (year as f64 / 400.0).floor();
    let dd = day as f64 + 0.5000115740;
    (365.25 * (year as f64 + 4716.0) + 0.01).floor() + (30.60001 * (month as f64 + 1.0)).floor()
        + dd
        + b
        - 1524.5
}

/// 计算 `year` 年第 `term` 个节气（0 起，小寒为 0）的儒略日。
pub(crate) fn term_julian_day(year: i32, term: usize) -> f64 {
    let elapsed = TROPICAL_YEAR_DAYS * (year - 1900) as f64 + TERM_OFFSET_SECONDS[term] / 86400.0;
    EPOCH_XIAOHAN_JD + elapsed
}

/// 取得 `date` 当日交节的节气序号，当日无交节则为 `None`。
///
/// 节气时刻与该日儒略日相差 ±0.5 日以内视为同日。
pub(crate) fn term_on(date: NaiveDate) -> Option<usize> {
    let jd = julian_day(date);
    (0..24).find(|&term| {
        let delta = jd - term_julian_day(date.year(), term);
        (-0.5..=0.5).contains(&delta)
    })
}

/// 节气序号转名称。
///
/// # Panics
///
/// 若序号不在 `0..24` 间则 panic。
pub fn name(term: usize) -> &'static str {
    TERM_NAMES[term]
}

/// 若 `term` 为划分干支月的「节」，返回其 `(干支月序, 月支)`。
pub(crate) fn month_boundary(term: usize) -> Option<(u32, &'static str)> {
    MONTH_BOUNDARY_TERMS
        .iter()
        .find(|&&(t, _, _)| t == term)
        .map(|&(_, month, branch)| (month, branch))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn civil(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn julian_days() {
        // JDN 2451545 = 2000-01-01
        assert!((julian_day(civil(2000, 1, 1)) - 2451545.0).abs() < 1e-3);
        assert!((julian_day(civil(1970, 1, 1)) - 2440588.0).abs() < 1e-3);
    }

    #[test]
    fn terms_on_known_days() {
        let dataset = [
            ((1901, 2, 4), Some("立春")),
            ((1999, 12, 7), Some("大雪")),
            ((1999, 12, 22), Some("冬至")),
            ((2024, 2, 4), Some("立春")),
            ((2024, 6, 5), Some("芒种")),
            ((2000, 1, 1), None),
            ((2024, 2, 14), None),
        ];
        for ((y, m, d), std) in dataset {
            assert_eq!(
                std,
                term_on(civil(y, m, d)).map(name),
                "{y:04}-{m:02}-{d:02}"
            );
        }
    }

    #[test]
    fn boundary_mapping() {
        assert_eq!(Some((0, "寅")), month_boundary(2));
        assert_eq!(Some((11, "丑")), month_boundary(0));
        assert_eq!(Some((10, "子")), month_boundary(22));
        // 中气不分月
        assert_eq!(None, month_boundary(1));
        assert_eq!(None, month_boundary(23));
    }

    #[test]
    fn boundary_gap_within_search_window() {
        // 相邻两「节」最大间隔远小于月柱回溯上限 40 日
        for term in MONTH_BOUNDARY_TERMS {
            let jd = term_julian_day(2024, term.0);
            let next = MONTH_BOUNDARY_TERMS
                .iter()
                .map(|&(t, _, _)| {
                    let mut d = term_julian_day(2024, t) - jd;
                    if d <= 0.0 {
                        d += TROPICAL_YEAR_DAYS;
                    }
                    d
                })
                .fold(f64::MAX, f64::min);
            assert!(next < 40.0);
        }
    }
}
