/// Article bundled for demos and smoke tests.
pub const SAMPLE_ARTICLE: &str = r#"Tech Giant Announces Breakthrough in Quantum Computing

In a groundbreaking development that could revolutionize computing as we know it, TechCorp has announced a major breakthrough in quantum computing technology. The company's research team has successfully demonstrated a quantum processor capable of solving complex problems exponentially faster than traditional supercomputers.

The new quantum chip, dubbed "Q-Prime," features 1,000 stable qubits and maintains quantum coherence for unprecedented durations. This achievement addresses one of the most significant challenges in quantum computing: keeping quantum states stable long enough to perform meaningful calculations.

Dr. Sarah Chen, lead scientist on the project, explained that the breakthrough came from a novel approach to error correction. "We've developed a new technique that uses machine learning to predict and correct quantum errors in real-time," she said during the announcement. "This allows our quantum processor to operate with reliability levels previously thought impossible."

Industry experts are calling this development a potential game-changer for fields ranging from drug discovery to cryptography. The enhanced computational power could accelerate the development of new medications, optimize complex logistics systems, and potentially break current encryption methods.

However, the announcement has also raised concerns about cybersecurity. Current encryption standards could become vulnerable once quantum computers become widely available. Experts are urging organizations to begin transitioning to quantum-resistant encryption methods.

TechCorp has stated that while this is a significant milestone, practical quantum computers for everyday use are still years away. The company plans to make its quantum computing platform available to select research institutions and partners starting next year.

The breakthrough has sent TechCorp's stock soaring by 15% in pre-market trading, with analysts projecting strong growth potential. Competitors in the quantum computing race, including IBM and Google, have congratulated TechCorp while emphasizing their own ongoing research efforts.

As the quantum computing race intensifies, this announcement marks a pivotal moment in the technology's evolution from theoretical possibility to practical reality."#;
