//! Built-in design quote list.

/// Design quotes as `(text, author)`, in selection order.
pub const DESIGN_QUOTES: &[(&str, &str)] = &[
    ("Design is not just what it looks like and feels like. Design is how it works.", "Steve Jobs"),
    ("Good design is obvious. Great design is transparent.", "Joe Sparano"),
    ("Design is thinking made visual.", "Saul Bass"),
    ("Simplicity is the ultimate sophistication.", "Leonardo da Vinci"),
    (
        "Design creates culture. Culture shapes values. Values determine the future.",
        "Robert L. Peters",
    ),
    ("The details are not the details. They make the design.", "Charles Eames"),
    ("Design is a solution to a problem. Art is a question to a problem.", "John Maeda"),
    ("Good design is as little design as possible.", "Dieter Rams"),
    ("Design is where science and art break even.", "Robin Mathew"),
    (
        "A designer knows he has achieved perfection not when there is nothing left to add, but when there is nothing left to take away.",
        "Antoine de Saint-Exupéry",
    ),
    ("Design is intelligence made visible.", "Alina Wheeler"),
    ("The function of design is letting design function.", "Micha Commeren"),
    ("Design is not for philosophy it's for life.", "Issey Miyake"),
    ("Everything is designed. Few things are designed well.", "Brian Reed"),
    ("Design is the conscious effort to impose a meaningful order.", "Victor Papanek"),
    ("Creativity is intelligence having fun.", "Albert Einstein"),
    (
        "Design is about making things good (and then better) and right (and fantastic) for the people who use and encounter them.",
        "Matt Beale",
    ),
    ("The best design is the simplest one that works.", "Albert Einstein"),
    ("Design is the method of putting form and content together.", "Paul Rand"),
    ("Good design is good business.", "Thomas Watson Jr."),
    (
        "Design is not just what it looks like and feels like — design is how it works.",
        "Steve Jobs",
    ),
    (
        "The alternative to good design is always bad design. There is no such thing as no design.",
        "Adam Judge",
    ),
    (
        "Design is a funny word. Some people think design means how it looks. But of course, if you dig deeper, it's really how it works.",
        "Steve Jobs",
    ),
    ("You can't use up creativity. The more you use, the more you have.", "Maya Angelou"),
    (
        "Design is the fundamental soul of a man-made creation that ends up expressing itself in successive outer layers.",
        "Steve Jobs",
    ),
    ("Innovation distinguishes between a leader and a follower.", "Steve Jobs"),
    ("The life of a designer is a life of fight: fight against the ugliness.", "Massimo Vignelli"),
    ("Design is so simple, that's why it is so complicated.", "Paul Rand"),
    (
        "Content precedes design. Design in the absence of content is not design, it's decoration.",
        "Jeffrey Zeldman",
    ),
    (
        "Design is a plan for arranging elements in such a way as best to accomplish a particular purpose.",
        "Charles Eames",
    ),
    ("Recognizing the need is the primary condition for design.", "Charles Eames"),
    ("Design is the conscious effort to impose a meaningful order.", "Victor Papanek"),
    ("The public is more familiar with bad design than good design.", "Paul Rand"),
    (
        "Design must reflect the practical and aesthetic in business but above all... good design must primarily serve people.",
        "Thomas Watson Jr.",
    ),
    (
        "Graphic design is the paradise of individuality, eccentricity, heresy, abnormality, hobbies and humors.",
        "George Santayana",
    ),
    ("Design is the intermediary between information and understanding.", "Hans Hofmann"),
    ("Art is to console those who are broken by life.", "Vincent van Gogh"),
    ("Inspiration exists, but it has to find you working.", "Pablo Picasso"),
    ("The secret to creativity is knowing how to hide your sources.", "Einstein"),
    (
        "Design is not making beauty, beauty emerges from selection, affinities, integration, love.",
        "Louis Kahn",
    ),
    ("Have no fear of perfection - you'll never reach it.", "Salvador Dalí"),
    ("The best way to predict the future is to design it.", "Buckminster Fuller"),
    ("Design is a response to social change.", "George Nelson"),
    ("Every great design begins with an even better story.", "Lorinda Mamo"),
    ("Design is the silent ambassador of your brand.", "Paul Rand"),
    (
        "Perfection is achieved not when there is nothing more to add, but when there is nothing left to take away.",
        "Antoine de Saint-Exupéry",
    ),
    (
        "Design is about point of view, and there should be some sort of woman or lifestyle or attitude in one's head as a designer.",
        "Vera Wang",
    ),
    (
        "To design is to communicate clearly by whatever means you can control or master.",
        "Milton Glaser",
    ),
    (
        "Design is the search for a magical balance between business and art; art and craft; intuition and reason; concept and detail; playfulness and formality; client and designer; designer and user; function and form.",
        "Valerie Pettis",
    ),
    (
        "The role of the designer is that of a good, thoughtful host anticipating the needs of his guests.",
        "Charles Eames",
    ),
    ("Design is as much an act of spacing as an act of marking.", "Ellen Lupton"),
];
