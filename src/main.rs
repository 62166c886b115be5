fn main() -> anyhow::Result<()> {
    bioinsight::run()
}
