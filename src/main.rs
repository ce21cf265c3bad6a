fn main() {
    verse_study_lib::run()
}
