fn main() -> anyhow::Result<()> {
    solution_inspector::run()
}
