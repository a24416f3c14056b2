use crate::types::Plan;

const BAR_WIDTH: usize = 40;

/// Fill bar for one spool, `#` for used length and `.` for offcut.
pub fn render_bar(sum: u64, capacity: u32, width: usize) -> String {
    if capacity == 0 || width == 0 {
        return String::new();
    }
    let filled = ((sum as f64 / capacity as f64) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!("[{}{}]", "#".repeat(filled), ".".repeat(width - filled))
}

pub fn render_plan(plan: &Plan, bars: bool) -> String {
    let mut out = String::new();
    for group in &plan.groups {
        let lengths: Vec<String> = group.values().iter().map(|v| v.to_string()).collect();
        out.push_str(&format!("Spool {}:\n", group.id));
        out.push_str(&format!("  Nodes: {}\n", group.labels().join(", ")));
        out.push_str(&format!("  Lengths: {}\n", lengths.join(", ")));
        out.push_str(&format!(
            "  Used: {}/{} (waste {})\n",
            group.sum,
            plan.capacity,
            group.waste(plan.capacity)
        ));
        if bars {
            out.push_str(&format!(
                "  {}\n",
                render_bar(group.sum, plan.capacity, BAR_WIDTH)
            ));
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "Summary: {} spool{} used, {} cut, {:.1}% waste\n",
        plan.group_count(),
        if plan.group_count() == 1 { "" } else { "s" },
        plan.total_length(),
        plan.total_waste_percent(),
    ));
    out
}
