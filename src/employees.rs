use crate::core::domain::Identifiable;

pub mod command;
pub mod controller;
pub mod domain;
pub mod dto;
pub mod factory;
pub mod repository;

pub(crate) trait Employee: Identifiable {
    fn is_admin(&self) -> bool;
    // true when the day of month is listed in the employee's schedule
    fn works_on(&self, day: u32) -> bool;
}

// schedule days are stored as a comma separated list such as "1,15"
pub(crate) fn parse_schedule_days(schedule_days: &str) -> Vec<u32> {
    schedule_days.split(',')
        .filter_map(|d| d.trim().parse::<u32>().ok())
        .filter(|d| (1..=31).contains(d))
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::employees::parse_schedule_days;

    #[tokio::test]
    async fn test_should_parse_schedule_days() {
        assert_eq!(vec![1, 15], parse_schedule_days("1,15"));
        assert_eq!(vec![2, 16], parse_schedule_days(" 2, 16 ,"));
        assert_eq!(Vec::<u32>::new(), parse_schedule_days(""));
        assert_eq!(vec![31], parse_schedule_days("0,31,32,x"));
    }
}
