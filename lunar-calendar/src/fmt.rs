//! Traditional chinese names for the components of lunar dates.

const NUMERALS: [&str; 10] = ["十", "一", "二", "三", "四", "五", "六", "七", "八", "九"];

const HEAVENLY_STEMS: [&str; 10] = ["癸", "甲", "乙", "丙", "丁", "戊", "己", "庚", "辛", "壬"];

const EARTHLY_BRANCHES: [&str; 12] = [
    "亥", "子", "丑", "寅", "卯", "辰", "巳", "午", "未", "申", "酉", "戌",
];

const ZODIAC: [&str; 12] = [
    "猪", "鼠", "牛", "虎", "兔", "龙", "蛇", "马", "羊", "猴", "鸡", "狗",
];

/// Name of a lunar month, `"???"` if the month is out of range.
///
/// ```
/// use lunar_calendar::fmt;
///
/// assert_eq!(fmt::month(1, false), "正月");
/// assert_eq!(fmt::month(4, true), "闰四月");
/// assert_eq!(fmt::month(11, false), "冬月");
/// ```
pub fn month(month: u8, leap: bool) -> String {
    let name = match month {
        1 => "正",
        2..=10 => NUMERALS[usize::from(month % 10)],
        11 => "冬",
        12 => "腊",
        _ => return "???".to_string(),
    };

    let prefix = if leap { "闰" } else { "" };
    format!("{prefix}{name}月")
}

/// Name of a day of a lunar month, `"???"` if the day is out of range.
///
/// ```
/// use lunar_calendar::fmt;
///
/// assert_eq!(fmt::day(1), "初一");
/// assert_eq!(fmt::day(15), "十五");
/// assert_eq!(fmt::day(20), "二十");
/// assert_eq!(fmt::day(30), "三十");
/// ```
pub fn day(day: u8) -> String {
    let units = NUMERALS[usize::from(day % 10)];

    match day {
        1..=10 => format!("初{units}"),
        11..=19 => format!("十{units}"),
        20 => "二十".to_string(),
        21..=29 => format!("廿{units}"),
        30 => "三十".to_string(),
        _ => "???".to_string(),
    }
}

/// Name of a position of the sexagenary cycle, starting at 1 for `"甲子"`.
///
/// ```
/// use lunar_calendar::fmt;
///
/// assert_eq!(fmt::sexagenary(1), "甲子");
/// assert_eq!(fmt::sexagenary(60), "癸亥");
/// ```
pub fn sexagenary(num: u32) -> String {
    let stem = HEAVENLY_STEMS[(num % 10) as usize];
    let branch = EARTHLY_BRANCHES[(num % 12) as usize];
    format!("{stem}{branch}")
}

/// Zodiac animal of a position of the sexagenary cycle.
pub fn zodiac(num: u32) -> &'static str {
    ZODIAC[(num % 12) as usize]
}
