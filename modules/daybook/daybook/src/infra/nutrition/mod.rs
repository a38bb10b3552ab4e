mod calorie_ninjas;

pub use calorie_ninjas::CalorieNinjasClient;
