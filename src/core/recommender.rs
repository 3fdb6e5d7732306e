use crate::core::similarity::{cosine_similarity, SparseVector, TfidfVectorizer};

/// A catalog position with its similarity to the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranked {
    pub index: usize,
    pub score: f64,
}

/// Tuning knobs for the recommender
#[derive(Debug, Clone, Copy)]
pub struct RecommenderConfig {
    /// Vocabulary size cap
    pub max_features: usize,
    /// Results scoring below this are dropped
    pub min_similarity: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            max_features: 5000,
            min_similarity: 0.0,
        }
    }
}

/// Content-based course recommender
///
/// Every course document is embedded once as a TF-IDF vector at construction.
/// Queries rank the whole catalog by cosine similarity.
///
/// # Ranking
/// 1. Score every course against the query vector
/// 2. Drop the query course itself (for course-to-course queries)
/// 3. Drop scores below `min_similarity`
/// 4. Sort by score (descending), then catalog order
/// 5. Truncate to the requested limit
#[derive(Debug, Clone, Default)]
pub struct Recommender {
    vectorizer: TfidfVectorizer,
    vectors: Vec<SparseVector>,
    min_similarity: f64,
}

impl Recommender {
    pub fn fit(documents: &[String], config: RecommenderConfig) -> Self {
        let vectorizer = TfidfVectorizer::fit(documents, config.max_features);
        let vectors = documents
            .iter()
            .map(|document| vectorizer.transform(document))
            .collect();

        Self {
            vectorizer,
            vectors,
            min_similarity: config.min_similarity,
        }
    }

    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Courses most similar to the course at `index`, excluding itself
    ///
    /// Returns nothing for an index outside the catalog.
    pub fn similar_to(&self, index: usize, limit: usize) -> Vec<Ranked> {
        match self.vectors.get(index) {
            Some(query) => self.rank(query, Some(index), limit),
            None => Vec::new(),
        }
    }

    /// Courses most similar to a free-text query
    pub fn rank_text(&self, text: &str, limit: usize) -> Vec<Ranked> {
        let query = self.vectorizer.transform(&text.to_lowercase());
        self.rank(&query, None, limit)
    }

    fn rank(&self, query: &[(usize, f64)], exclude: Option<usize>, limit: usize) -> Vec<Ranked> {
        let mut ranked: Vec<Ranked> = self
            .vectors
            .iter()
            .enumerate()
            .filter(|(index, _)| Some(*index) != exclude)
            .map(|(index, vector)| Ranked {
                index,
                score: cosine_similarity(query, vector),
            })
            .filter(|ranked| ranked.score >= self.min_similarity)
            .collect();

        ranked.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.index.cmp(&b.index))
        });

        ranked.truncate(limit);
        ranked
    }
}
