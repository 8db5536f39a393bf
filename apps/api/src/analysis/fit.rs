/// Unweighted mean of the four sub-scores, rounded half-up.
pub fn aggregate(skills: u32, soft_skills: u32, education: u32, relevant_experience: u32) -> u32 {
    // widened so out-of-range inputs cannot overflow; the mean of four u32 fits in u32
    let sum = u64::from(skills)
        + u64::from(soft_skills)
        + u64::from(education)
        + u64::from(relevant_experience);
    ((sum + 2) / 4) as u32
}
